//! Application layer use cases for the picture-uploads settings.
//!
//! Use cases in this layer orchestrate the domain types from `picup_core`
//! and depend only on traits ([`PreferencesStore`](picup_core::PreferencesStore),
//! [`UploadHandler`](upload_handler::UploadHandler),
//! [`JobScheduler`](sync_job::JobScheduler), [`Clock`](clock::Clock)).
//! Concrete file-backed implementations live in `infrastructure`.
//!
//! # Sub-modules
//!
//! - **`picture_uploads`** – The settings mediator behind the picture-uploads
//!   screen: reads and writes the preferences and decides when the upload
//!   handler must be told about a change.
//!
//! - **`upload_handler`** – Tracks the last-sync timestamps and turns the
//!   current configuration into a sync job request.
//!
//! - **`sync_job`** – The sync job request and the scheduler it is handed to.
//!
//! - **`clock`** – Wall-clock access, injectable for tests.

pub mod clock;
pub mod picture_uploads;
pub mod sync_job;
pub mod upload_handler;
