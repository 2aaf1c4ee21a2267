//! FileJobScheduler: one TOML file per pending job.
//!
//! Layout inside the jobs directory:
//!
//! ```text
//! jobs/
//!   job-1.toml     ← the camera-uploads sync request
//! ```
//!
//! A job file looks like this (a pictures-only request):
//!
//! ```toml
//! job_id = 1
//! request_id = "6f1c2d9e-8b1a-4c61-9a55-0e4b7d2f3a10"
//! interval_ms = 900000
//! requested_at = 1700000000000
//! account_name = "alice@cloud"
//! behaviour_after_upload = "MOVE"
//!
//! [pictures]
//! source_path = "/storage/emulated/0/DCIM/Camera"
//! upload_path = "/CameraUpload"
//! wifi_only = true
//! last_sync = 1700000000000
//! ```
//!
//! Absent media kinds and an absent account name are simply left out.
//!
//! # Replacing and cancelling
//!
//! Scheduling writes to a temporary `job-<id>.toml.tmp` and renames it over
//! the previous request, so a runner never observes a half-written file.
//! A fresh `request_id` on every schedule lets the runner notice that the
//! request changed even when the settings did not.
//!
//! Cancelling deletes the file; cancelling a job that is not pending is not
//! an error.  [`JobScheduler::pending`] reads the file back, which is how
//! `picup status` reports whether a job is scheduled.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::application::sync_job::{JobScheduler, SchedulerError, SyncJobRequest};

/// A [`JobScheduler`] that stores requests under a directory.
#[derive(Debug, Clone)]
pub struct FileJobScheduler {
    dir: PathBuf,
}

impl FileJobScheduler {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding the request for `job_id`.
    pub fn job_path(&self, job_id: u32) -> PathBuf {
        self.dir.join(format!("job-{job_id}.toml"))
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SchedulerError + '_ {
        move |source| SchedulerError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl JobScheduler for FileJobScheduler {
    fn schedule(&self, request: &SyncJobRequest) -> Result<(), SchedulerError> {
        std::fs::create_dir_all(&self.dir).map_err(Self::io_error(&self.dir))?;

        let content =
            toml::to_string_pretty(request).map_err(|e| SchedulerError::Encode(e.to_string()))?;
        let path = self.job_path(request.job_id);
        let staging = path.with_extension("toml.tmp");
        std::fs::write(&staging, content).map_err(Self::io_error(&staging))?;
        std::fs::rename(&staging, &path).map_err(Self::io_error(&path))?;

        debug!("wrote sync job request to {}", path.display());
        Ok(())
    }

    fn cancel(&self, job_id: u32) -> Result<(), SchedulerError> {
        let path = self.job_path(job_id);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("cancelled job {job_id}");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SchedulerError::Io { path, source }),
        }
    }

    fn pending(&self, job_id: u32) -> Result<Option<SyncJobRequest>, SchedulerError> {
        let path = self.job_path(job_id);
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map(Some)
                .map_err(|e| SchedulerError::Decode {
                    path,
                    reason: e.to_string(),
                }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SchedulerError::Io { path, source }),
        }
    }
}
