//! Domain rules for camera uploads.
//!
//! Pure logic with no infrastructure dependencies: everything here can be
//! compiled and tested without a file system, a scheduler, or a UI.

/// The camera-uploads configuration snapshot read from preferences.
pub mod configuration;

/// Source-path normalization and change detection.
pub mod paths;

/// Payloads handed back by the folder pickers.
pub mod selection;
