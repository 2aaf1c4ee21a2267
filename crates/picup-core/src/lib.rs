//! # picup-core
//!
//! Shared library for the camera-uploads settings: preference keys and their
//! defaults, the key-value store abstraction, the camera-uploads
//! configuration snapshot, and the source-path comparison rule.
//!
//! This crate has zero dependencies on the file system, the OS, or any UI.
//! File-backed stores and the job scheduler live in `picup-settings`.
//!
//! - **`preferences`** – The [`PreferencesStore`] trait, the typed
//!   [`PreferenceValue`], the well-known keys and defaults, and an in-memory
//!   store used by tests.
//!
//! - **`domain`** – Pure rules built on top of the preferences: the
//!   [`CameraUploadsConfiguration`] snapshot, path normalization, and the
//!   payloads returned by the folder pickers.

pub mod domain;
pub mod preferences;

pub use domain::configuration::{BehaviourAfterUpload, CameraUploadsConfiguration, UnknownBehaviour};
pub use domain::paths::{source_path_changed, strip_trailing_separator, PATH_SEPARATOR};
pub use domain::selection::{RemoteFolder, SelectionKind, SourcePathSelection, UploadPathSelection};
pub use preferences::memory::MemoryPreferences;
pub use preferences::{PreferenceValue, PreferencesError, PreferencesStore};
