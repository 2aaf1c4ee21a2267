//! CameraUploadsHandler: last-sync bookkeeping and sync job scheduling.
//!
//! The handler owns two timestamps, one per media kind, persisted in the
//! preferences store.  A timestamp is the point in time from which new
//! media is picked up; `0` means no baseline has been recorded yet.
//!
//! Scheduling works from the configuration most recently pushed with
//! [`UploadHandler::set_camera_uploads_config`]:
//!
//! ```text
//! nothing enabled          ──►  cancel the pending job
//! something enabled        ──►  replace 0 baselines with "now"
//!                          ──►  schedule a fresh SyncJobRequest
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use picup_core::preferences::keys::{
    LAST_SYNC_SENTINEL, PREF_CAMERA_PICTURES_LAST_SYNC, PREF_CAMERA_VIDEOS_LAST_SYNC,
};
use picup_core::{CameraUploadsConfiguration, PreferencesError, PreferencesStore};
use thiserror::Error;
use tracing::{debug, info};

use super::clock::Clock;
use super::sync_job::{JobScheduler, SchedulerError, SyncJobRequest, CAMERA_UPLOADS_SYNC_JOB_ID};

/// Error type for upload handler operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to persist last sync: {0}")]
    Preferences(#[from] PreferencesError),
    #[error("failed to schedule sync job: {0}")]
    Scheduler(#[from] SchedulerError),
}

/// Collaborator that tracks last-sync time and schedules the upload job.
#[cfg_attr(test, mockall::automock)]
pub trait UploadHandler: Send + Sync {
    /// Records `timestamp` as the pictures baseline.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Preferences`] if the value cannot be persisted.
    fn update_pictures_last_sync(&self, timestamp: i64) -> Result<(), HandlerError>;

    /// Records `timestamp` as the videos baseline.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Preferences`] if the value cannot be persisted.
    fn update_videos_last_sync(&self, timestamp: i64) -> Result<(), HandlerError>;

    fn pictures_last_sync(&self) -> i64;

    fn videos_last_sync(&self) -> i64;

    /// Replaces the configuration used by the next scheduling call.
    fn set_camera_uploads_config(&self, config: CameraUploadsConfiguration);

    /// Schedules (or cancels) the sync job according to the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] if a baseline cannot be persisted or the
    /// scheduler rejects the request.
    fn schedule_camera_uploads_sync_job(&self) -> Result<(), HandlerError>;
}

/// The production [`UploadHandler`].
pub struct CameraUploadsHandler {
    preferences: Arc<dyn PreferencesStore>,
    scheduler: Arc<dyn JobScheduler>,
    clock: Arc<dyn Clock>,
    config: Mutex<CameraUploadsConfiguration>,
}

impl CameraUploadsHandler {
    pub fn new(
        config: CameraUploadsConfiguration,
        preferences: Arc<dyn PreferencesStore>,
        scheduler: Arc<dyn JobScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            preferences,
            scheduler,
            clock,
            config: Mutex::new(config),
        }
    }

    /// Returns a copy of the configuration scheduling currently works from.
    pub fn camera_uploads_config(&self) -> CameraUploadsConfiguration {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UploadHandler for CameraUploadsHandler {
    fn update_pictures_last_sync(&self, timestamp: i64) -> Result<(), HandlerError> {
        debug!("pictures last sync set to {timestamp}");
        self.preferences
            .put_long(PREF_CAMERA_PICTURES_LAST_SYNC, timestamp)?;
        Ok(())
    }

    fn update_videos_last_sync(&self, timestamp: i64) -> Result<(), HandlerError> {
        debug!("videos last sync set to {timestamp}");
        self.preferences
            .put_long(PREF_CAMERA_VIDEOS_LAST_SYNC, timestamp)?;
        Ok(())
    }

    fn pictures_last_sync(&self) -> i64 {
        self.preferences
            .get_long(PREF_CAMERA_PICTURES_LAST_SYNC, LAST_SYNC_SENTINEL)
    }

    fn videos_last_sync(&self) -> i64 {
        self.preferences
            .get_long(PREF_CAMERA_VIDEOS_LAST_SYNC, LAST_SYNC_SENTINEL)
    }

    fn set_camera_uploads_config(&self, config: CameraUploadsConfiguration) {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config;
    }

    fn schedule_camera_uploads_sync_job(&self) -> Result<(), HandlerError> {
        let config = self.camera_uploads_config();

        if !config.any_enabled() {
            info!("camera uploads disabled for pictures and videos; cancelling sync job");
            self.scheduler.cancel(CAMERA_UPLOADS_SYNC_JOB_ID)?;
            return Ok(());
        }

        let now = self.clock.now_millis();
        if config.enabled_for_pictures && self.pictures_last_sync() == LAST_SYNC_SENTINEL {
            self.update_pictures_last_sync(now)?;
        }
        if config.enabled_for_videos && self.videos_last_sync() == LAST_SYNC_SENTINEL {
            self.update_videos_last_sync(now)?;
        }

        let request = SyncJobRequest::new(
            &config,
            self.pictures_last_sync(),
            self.videos_last_sync(),
            now,
        );
        self.scheduler.schedule(&request)?;
        info!(
            "camera uploads sync job {} scheduled (request {}, pictures={}, videos={})",
            request.job_id,
            request.request_id,
            config.enabled_for_pictures,
            config.enabled_for_videos
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::MockClock;
    use crate::application::sync_job::MockJobScheduler;
    use picup_core::MemoryPreferences;

    const NOW: i64 = 1_700_000_000_000;

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_now_millis().return_const(NOW);
        Arc::new(clock)
    }

    fn pictures_enabled() -> CameraUploadsConfiguration {
        CameraUploadsConfiguration {
            enabled_for_pictures: true,
            ..CameraUploadsConfiguration::default()
        }
    }

    #[test]
    fn test_last_sync_defaults_to_sentinel() {
        let handler = CameraUploadsHandler::new(
            CameraUploadsConfiguration::default(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(MockJobScheduler::new()),
            fixed_clock(),
        );
        assert_eq!(handler.pictures_last_sync(), 0);
        assert_eq!(handler.videos_last_sync(), 0);
    }

    #[test]
    fn test_update_pictures_last_sync_persists_to_preferences() {
        // Arrange
        let prefs = Arc::new(MemoryPreferences::new());
        let handler = CameraUploadsHandler::new(
            CameraUploadsConfiguration::default(),
            prefs.clone(),
            Arc::new(MockJobScheduler::new()),
            fixed_clock(),
        );

        // Act
        handler.update_pictures_last_sync(42).unwrap();

        // Assert
        assert_eq!(handler.pictures_last_sync(), 42);
        assert_eq!(prefs.get_long(PREF_CAMERA_PICTURES_LAST_SYNC, 0), 42);
        assert_eq!(handler.videos_last_sync(), 0);
    }

    #[test]
    fn test_schedule_cancels_when_nothing_enabled() {
        // Arrange
        let mut scheduler = MockJobScheduler::new();
        scheduler
            .expect_cancel()
            .withf(|id| *id == CAMERA_UPLOADS_SYNC_JOB_ID)
            .times(1)
            .returning(|_| Ok(()));
        scheduler.expect_schedule().never();
        let handler = CameraUploadsHandler::new(
            CameraUploadsConfiguration::default(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(scheduler),
            fixed_clock(),
        );

        // Act / Assert
        assert!(handler.schedule_camera_uploads_sync_job().is_ok());
    }

    #[test]
    fn test_schedule_replaces_sentinel_with_now() {
        // Arrange
        let mut scheduler = MockJobScheduler::new();
        scheduler
            .expect_schedule()
            .withf(|req| {
                req.pictures.as_ref().map(|p| p.last_sync) == Some(NOW) && req.videos.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));
        let handler = CameraUploadsHandler::new(
            pictures_enabled(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(scheduler),
            fixed_clock(),
        );

        // Act
        handler.schedule_camera_uploads_sync_job().unwrap();

        // Assert
        assert_eq!(handler.pictures_last_sync(), NOW);
        assert_eq!(handler.videos_last_sync(), 0, "videos are disabled");
    }

    #[test]
    fn test_schedule_keeps_existing_baseline() {
        // Arrange
        let mut scheduler = MockJobScheduler::new();
        scheduler
            .expect_schedule()
            .withf(|req| req.pictures.as_ref().map(|p| p.last_sync) == Some(5))
            .times(1)
            .returning(|_| Ok(()));
        let handler = CameraUploadsHandler::new(
            pictures_enabled(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(scheduler),
            fixed_clock(),
        );
        handler.update_pictures_last_sync(5).unwrap();

        // Act
        handler.schedule_camera_uploads_sync_job().unwrap();

        // Assert
        assert_eq!(handler.pictures_last_sync(), 5);
    }

    #[test]
    fn test_schedule_uses_most_recently_pushed_config() {
        // Arrange: constructed disabled, then enabled via set_camera_uploads_config
        let mut scheduler = MockJobScheduler::new();
        scheduler.expect_cancel().never();
        scheduler.expect_schedule().times(1).returning(|_| Ok(()));
        let handler = CameraUploadsHandler::new(
            CameraUploadsConfiguration::default(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(scheduler),
            fixed_clock(),
        );

        // Act
        handler.set_camera_uploads_config(pictures_enabled());
        handler.schedule_camera_uploads_sync_job().unwrap();

        // Assert
        assert!(handler.camera_uploads_config().enabled_for_pictures);
    }

    #[test]
    fn test_schedule_propagates_scheduler_failure() {
        // Arrange
        let mut scheduler = MockJobScheduler::new();
        scheduler
            .expect_schedule()
            .returning(|_| Err(SchedulerError::Encode("boom".to_string())));
        let handler = CameraUploadsHandler::new(
            pictures_enabled(),
            Arc::new(MemoryPreferences::new()),
            Arc::new(scheduler),
            fixed_clock(),
        );

        // Act
        let result = handler.schedule_camera_uploads_sync_job();

        // Assert
        assert!(matches!(result, Err(HandlerError::Scheduler(_))));
    }
}
