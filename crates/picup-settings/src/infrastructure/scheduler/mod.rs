//! Scheduler infrastructure.
//!
//! Running the camera-uploads job is left to an external runner; this
//! module only records what should run.  `job_file` writes each
//! [`SyncJobRequest`](crate::application::sync_job::SyncJobRequest) to a TOML
//! file that the runner polls.

pub mod job_file;
