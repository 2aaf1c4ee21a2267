//! picup-settings library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! - **`application`** – The picture-uploads settings mediator, the upload
//!   handler, and the traits they are wired through.
//! - **`infrastructure`** – File-backed preferences, config, and job
//!   scheduler, plus the command bridge used by the CLI.

pub mod application;
pub mod infrastructure;
