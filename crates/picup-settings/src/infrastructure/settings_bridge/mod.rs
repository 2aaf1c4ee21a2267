//! Command bridge: exposes the picture-uploads settings to a front end.
//!
//! Every command takes the shared [`AppState`] and delegates to the
//! [`PictureUploadsSettings`] mediator.  The `picup` binary is the only
//! consumer of this module; the application layer must not import it.
//!
//! # Commands and the sync job
//!
//! Each command mirrors one control of the picture-uploads settings screen.
//! Commands that change what the sync job watches (Wi-Fi only, behaviour,
//! destination or source folder) ask the mediator to reschedule afterwards,
//! so a pending job always carries the saved settings.  The mediator only
//! schedules while picture uploads are enabled, which means those commands
//! are plain preference writes while uploads are off.
//!
//! Disabling is the one command that goes to the [`CameraUploadsHandler`]
//! directly: the mediator never schedules for a disabled kind, yet the job
//! must either drop its pictures target or be cancelled.  Disabling also
//! resets the pictures last-sync to the sentinel, so the next enable records
//! a fresh baseline instead of uploading everything taken in between.
//!
//! # Data Transfer Objects (DTOs)
//!
//! [`PictureUploadsDto`] flattens the mediator state into JSON-friendly
//! fields: paths as optional strings, the behaviour as its persisted name
//! (`"NOTHING"`, `"MOVE"`) and the last-sync as milliseconds since the Unix
//! epoch (`0` when no baseline is recorded).
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`.  This
//! gives every response the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//! A picker that came back empty is reported as `success: false` with the
//! [`SettingsError::MissingSelection`] message, and nothing is changed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use picup_core::{
    BehaviourAfterUpload, CameraUploadsConfiguration, PreferencesStore, RemoteFolder,
    SourcePathSelection, UploadPathSelection,
};
use serde::Serialize;
use tracing::warn;

use crate::application::clock::Clock;
use crate::application::picture_uploads::{PictureUploadsSettings, SettingsError};
use crate::application::sync_job::{JobScheduler, CAMERA_UPLOADS_SYNC_JOB_ID};
use crate::application::upload_handler::{CameraUploadsHandler, UploadHandler};

// ── Shared application state ──────────────────────────────────────────────────

/// Everything the commands need, wired once at startup.
pub struct AppState {
    pub preferences: Arc<dyn PreferencesStore>,
    pub scheduler: Arc<dyn JobScheduler>,
    pub handler: Arc<CameraUploadsHandler>,
    pub settings: Mutex<PictureUploadsSettings>,
}

impl AppState {
    /// Builds the handler and the mediator on top of the given collaborators
    /// and loads the cached paths.
    pub fn new(
        preferences: Arc<dyn PreferencesStore>,
        scheduler: Arc<dyn JobScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Arc<Self> {
        let handler = Arc::new(CameraUploadsHandler::new(
            CameraUploadsConfiguration::load(preferences.as_ref()),
            Arc::clone(&preferences),
            Arc::clone(&scheduler),
            Arc::clone(&clock),
        ));

        let mut settings = PictureUploadsSettings::new(
            Arc::clone(&preferences),
            Arc::clone(&handler) as Arc<dyn UploadHandler>,
            clock,
        );
        settings.load_picture_uploads_path();
        settings.load_picture_uploads_source_path();

        Arc::new(Self {
            preferences,
            scheduler,
            handler,
            settings: Mutex::new(settings),
        })
    }

    fn settings(&self) -> MutexGuard<'_, PictureUploadsSettings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// Everything the picture-uploads screen shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PictureUploadsDto {
    pub enabled: bool,
    pub wifi_only: bool,
    pub upload_path: Option<String>,
    pub source_path: Option<String>,
    pub behaviour_after_upload: String,
    pub last_sync: i64,
    pub sync_job_scheduled: bool,
}

/// Unified response wrapper used by every command.
#[derive(Debug, Serialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl<T: Serialize> From<Result<T, SettingsError>> for CommandResult<T> {
    fn from(result: Result<T, SettingsError>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(e.to_string()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns the current picture-uploads settings.
pub fn get_picture_uploads(state: &AppState) -> CommandResult<PictureUploadsDto> {
    let settings = state.settings();
    let sync_job_scheduled = match state.scheduler.pending(CAMERA_UPLOADS_SYNC_JOB_ID) {
        Ok(pending) => pending.is_some(),
        Err(e) => return CommandResult::err(format!("failed to read sync job: {e}")),
    };

    CommandResult::ok(PictureUploadsDto {
        enabled: settings.is_picture_upload_enabled(),
        wifi_only: settings.is_wifi_only(),
        upload_path: settings.picture_uploads_path().map(str::to_string),
        source_path: settings.picture_uploads_source_path().map(str::to_string),
        behaviour_after_upload: settings.behaviour_after_upload().to_string(),
        last_sync: state.handler.pictures_last_sync(),
        sync_job_scheduled,
    })
}

/// Enables or disables picture uploads and brings the sync job in line.
///
/// Disabling also resets the pictures last-sync, so re-enabling records a
/// fresh baseline.
///
/// Returns whether a sync job is scheduled afterwards.
pub fn set_picture_uploads_enabled(state: &AppState, enabled: bool) -> CommandResult<bool> {
    let settings = state.settings();
    if let Err(e) = settings.set_enable_picture_upload(enabled) {
        return CommandResult::err(e.to_string());
    }

    if enabled {
        return settings.schedule_picture_uploads_sync_job().into();
    }

    // Drop the baseline so a later enable starts from that moment instead of
    // uploading everything taken while uploads were off.
    if let Err(e) = settings.update_pictures_last_sync() {
        return CommandResult::err(e.to_string());
    }

    // Disabling never reaches the handler through the mediator; refresh the
    // job directly so it stops watching pictures (or is cancelled).
    let config = CameraUploadsConfiguration::load(state.preferences.as_ref());
    let still_enabled = config.any_enabled();
    state.handler.set_camera_uploads_config(config);
    match state.handler.schedule_camera_uploads_sync_job() {
        Ok(()) => CommandResult::ok(still_enabled),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn set_wifi_only(state: &AppState, wifi_only: bool) -> CommandResult<bool> {
    let settings = state.settings();
    settings
        .set_wifi_only(wifi_only)
        .and_then(|()| settings.schedule_picture_uploads_sync_job())
        .into()
}

pub fn set_behaviour_after_upload(
    state: &AppState,
    behaviour: BehaviourAfterUpload,
) -> CommandResult<bool> {
    let settings = state.settings();
    settings
        .set_behaviour_after_upload(behaviour)
        .and_then(|()| settings.schedule_picture_uploads_sync_job())
        .into()
}

/// Applies a destination picker result.  `None` means the picker came back empty.
///
/// Returns the new destination path.
pub fn select_upload_path(state: &AppState, remote_path: Option<String>) -> CommandResult<String> {
    let selection = UploadPathSelection {
        folder: remote_path.map(RemoteFolder::new),
    };
    let mut settings = state.settings();
    let result = settings
        .handle_select_picture_uploads_path(&selection)
        .map(|()| settings.picture_uploads_path().unwrap_or_default().to_string());
    reschedule_after(&settings, result)
}

/// Applies a source picker result.  `None` means the picker came back empty.
///
/// Returns the new source path.
pub fn select_source_path(state: &AppState, path: Option<String>) -> CommandResult<String> {
    let selection = SourcePathSelection { path };
    let mut settings = state.settings();
    let result = settings
        .handle_select_picture_uploads_source_path(&selection)
        .map(|()| {
            settings
                .picture_uploads_source_path()
                .unwrap_or_default()
                .to_string()
        });
    reschedule_after(&settings, result)
}

/// Resets the pictures last-sync to the "no baseline" sentinel.
pub fn reset_pictures_last_sync(state: &AppState) -> CommandResult<()> {
    state.settings().update_pictures_last_sync().into()
}

/// Schedules the sync job if picture uploads are enabled.
///
/// Returns whether scheduling was requested.
pub fn schedule_sync_job(state: &AppState) -> CommandResult<bool> {
    state.settings().schedule_picture_uploads_sync_job().into()
}

fn reschedule_after(
    settings: &PictureUploadsSettings,
    result: Result<String, SettingsError>,
) -> CommandResult<String> {
    let value = match result {
        Ok(value) => value,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    if let Err(e) = settings.schedule_picture_uploads_sync_job() {
        warn!("setting saved but sync job could not be rescheduled: {e}");
        return CommandResult::err(e.to_string());
    }
    CommandResult::ok(value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
