//! Camera-uploads sync job requests and the scheduler abstraction.
//!
//! A [`SyncJobRequest`] is a self-contained description of the periodic
//! job that scans the source folders and uploads new media.  The upload
//! handler builds it from the current [`CameraUploadsConfiguration`] and the
//! last-sync timestamps; a [`JobScheduler`] hands it to whatever runs jobs.
//!
//! There is only ever one camera-uploads job: scheduling again replaces the
//! previous request with the same [`CAMERA_UPLOADS_SYNC_JOB_ID`].

use std::path::PathBuf;

use picup_core::{BehaviourAfterUpload, CameraUploadsConfiguration};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifier of the single camera-uploads sync job.
pub const CAMERA_UPLOADS_SYNC_JOB_ID: u32 = 1;

/// How often the sync job runs, in milliseconds (15 minutes).
pub const CAMERA_UPLOADS_SYNC_INTERVAL_MS: u64 = 15 * 60 * 1000;

/// Error type for scheduler operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing job at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be encoded for storage.
    #[error("failed to encode sync job request: {0}")]
    Encode(String),

    /// A stored request could not be decoded.
    #[error("failed to decode sync job at {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// What the job watches and where it uploads, for one media kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSyncTarget {
    pub source_path: String,
    pub upload_path: String,
    pub wifi_only: bool,
    /// Media older than this (ms since the Unix epoch) is not uploaded.
    pub last_sync: i64,
}

/// A request to run the camera-uploads sync job periodically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncJobRequest {
    pub job_id: u32,
    /// Unique per request, so a runner can tell a replaced request apart.
    pub request_id: Uuid,
    pub interval_ms: u64,
    pub requested_at: i64,
    pub account_name: Option<String>,
    pub behaviour_after_upload: BehaviourAfterUpload,
    pub pictures: Option<MediaSyncTarget>,
    pub videos: Option<MediaSyncTarget>,
}

impl SyncJobRequest {
    /// Builds a request from `config`.  Only enabled media kinds get a target.
    pub fn new(
        config: &CameraUploadsConfiguration,
        pictures_last_sync: i64,
        videos_last_sync: i64,
        requested_at: i64,
    ) -> Self {
        let pictures = config.enabled_for_pictures.then(|| MediaSyncTarget {
            source_path: config.source_path_for_pictures.clone(),
            upload_path: config.upload_path_for_pictures.clone(),
            wifi_only: config.wifi_only_for_pictures,
            last_sync: pictures_last_sync,
        });
        let videos = config.enabled_for_videos.then(|| MediaSyncTarget {
            source_path: config.source_path_for_videos.clone(),
            upload_path: config.upload_path_for_videos.clone(),
            wifi_only: config.wifi_only_for_videos,
            last_sync: videos_last_sync,
        });

        Self {
            job_id: CAMERA_UPLOADS_SYNC_JOB_ID,
            request_id: Uuid::new_v4(),
            interval_ms: CAMERA_UPLOADS_SYNC_INTERVAL_MS,
            requested_at,
            account_name: config.upload_account_name.clone(),
            behaviour_after_upload: config.behaviour_after_upload,
            pictures,
            videos,
        }
    }
}

/// Hands sync job requests to whatever executes them.
#[cfg_attr(test, mockall::automock)]
pub trait JobScheduler: Send + Sync {
    /// Schedules `request`, replacing any pending request with the same job id.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] if the request cannot be stored.
    fn schedule(&self, request: &SyncJobRequest) -> Result<(), SchedulerError>;

    /// Cancels the job `job_id`.  Cancelling a job that is not pending is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] if the pending request cannot be removed.
    fn cancel(&self, job_id: u32) -> Result<(), SchedulerError>;

    /// Returns the pending request for `job_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError`] if a stored request cannot be read.
    fn pending(&self, job_id: u32) -> Result<Option<SyncJobRequest>, SchedulerError>;
}
