//! PictureUploadsSettings: the mediator behind the picture-uploads screen.
//!
//! Sits between the persisted preferences (enabled flag, upload destination,
//! source folder, Wi-Fi and after-upload options) and the [`UploadHandler`]
//! that owns the last-sync timestamps and the sync job.
//!
//! The destination and source paths are cached after `load_*` so the screen
//! can show them without re-reading the store.  Picker results that come
//! back empty are reported as [`SettingsError::MissingSelection`] and leave
//! both the cache and the store untouched.

use std::sync::Arc;

use picup_core::domain::configuration::load_behaviour;
use picup_core::preferences::keys::{
    DEFAULT_SOURCE_PATH, DEFAULT_UPLOAD_PATH, LAST_SYNC_SENTINEL,
    PREF_CAMERA_PICTURE_UPLOADS_ENABLED, PREF_CAMERA_PICTURE_UPLOADS_PATH,
    PREF_CAMERA_PICTURE_UPLOADS_SOURCE, PREF_CAMERA_PICTURE_UPLOADS_WIFI_ONLY,
    PREF_CAMERA_UPLOADS_BEHAVIOUR,
};
use picup_core::{
    source_path_changed, BehaviourAfterUpload, CameraUploadsConfiguration, PreferencesError,
    PreferencesStore, SelectionKind, SourcePathSelection, UploadPathSelection,
};
use thiserror::Error;
use tracing::{debug, info};

use super::clock::Clock;
use super::upload_handler::{HandlerError, UploadHandler};

/// Error type for picture-uploads settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A picker returned without the expected folder or path.
    #[error("no {0} was selected")]
    MissingSelection(SelectionKind),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// The picture-uploads settings mediator.
pub struct PictureUploadsSettings {
    preferences: Arc<dyn PreferencesStore>,
    handler: Arc<dyn UploadHandler>,
    clock: Arc<dyn Clock>,
    upload_path: Option<String>,
    upload_source_path: Option<String>,
}

impl PictureUploadsSettings {
    pub fn new(
        preferences: Arc<dyn PreferencesStore>,
        handler: Arc<dyn UploadHandler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            preferences,
            handler,
            clock,
            upload_path: None,
            upload_source_path: None,
        }
    }

    pub fn is_picture_upload_enabled(&self) -> bool {
        self.preferences
            .get_bool(PREF_CAMERA_PICTURE_UPLOADS_ENABLED, false)
    }

    pub fn set_enable_picture_upload(&self, value: bool) -> Result<(), SettingsError> {
        self.preferences
            .put_bool(PREF_CAMERA_PICTURE_UPLOADS_ENABLED, value)?;
        info!("picture uploads {}", if value { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn is_wifi_only(&self) -> bool {
        self.preferences
            .get_bool(PREF_CAMERA_PICTURE_UPLOADS_WIFI_ONLY, false)
    }

    pub fn set_wifi_only(&self, value: bool) -> Result<(), SettingsError> {
        self.preferences
            .put_bool(PREF_CAMERA_PICTURE_UPLOADS_WIFI_ONLY, value)?;
        Ok(())
    }

    pub fn behaviour_after_upload(&self) -> BehaviourAfterUpload {
        load_behaviour(self.preferences.as_ref())
    }

    pub fn set_behaviour_after_upload(
        &self,
        behaviour: BehaviourAfterUpload,
    ) -> Result<(), SettingsError> {
        self.preferences
            .put_string(PREF_CAMERA_UPLOADS_BEHAVIOUR, behaviour.as_str())?;
        Ok(())
    }

    /// Resets the pictures last-sync to the "no baseline" sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Handler`] if the handler cannot persist it.
    pub fn update_pictures_last_sync(&self) -> Result<(), SettingsError> {
        self.handler.update_pictures_last_sync(LAST_SYNC_SENTINEL)?;
        Ok(())
    }

    pub fn load_picture_uploads_path(&mut self) {
        self.upload_path = Some(
            self.preferences
                .get_string(PREF_CAMERA_PICTURE_UPLOADS_PATH, DEFAULT_UPLOAD_PATH),
        );
    }

    /// The cached destination path; `None` until loaded or selected.
    pub fn picture_uploads_path(&self) -> Option<&str> {
        self.upload_path.as_deref()
    }

    pub fn load_picture_uploads_source_path(&mut self) {
        self.upload_source_path = Some(
            self.preferences
                .get_string(PREF_CAMERA_PICTURE_UPLOADS_SOURCE, DEFAULT_SOURCE_PATH),
        );
    }

    /// The cached source path; `None` until loaded or selected.
    pub fn picture_uploads_source_path(&self) -> Option<&str> {
        self.upload_source_path.as_deref()
    }

    /// Applies the destination picker result.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingSelection`] if no folder was picked, or
    /// [`SettingsError::Preferences`] if the path cannot be persisted.
    pub fn handle_select_picture_uploads_path(
        &mut self,
        selection: &UploadPathSelection,
    ) -> Result<(), SettingsError> {
        let folder = selection
            .folder
            .as_ref()
            .ok_or(SettingsError::MissingSelection(SelectionKind::UploadPath))?;

        self.preferences
            .put_string(PREF_CAMERA_PICTURE_UPLOADS_PATH, &folder.remote_path)?;
        self.upload_path = Some(folder.remote_path.clone());
        debug!("picture uploads path set to {}", folder.remote_path);
        Ok(())
    }

    /// Applies the source picker result.
    ///
    /// When the selected folder differs from the cached one (ignoring one
    /// trailing separator on the cached path), the pictures last-sync is set
    /// to now so files already in the new folder are not uploaded.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingSelection`] if no path was picked,
    /// [`SettingsError::Handler`] if the last-sync update fails, or
    /// [`SettingsError::Preferences`] if the path cannot be persisted.
    pub fn handle_select_picture_uploads_source_path(
        &mut self,
        selection: &SourcePathSelection,
    ) -> Result<(), SettingsError> {
        let selected = selection
            .path
            .as_deref()
            .ok_or(SettingsError::MissingSelection(SelectionKind::SourcePath))?;

        if source_path_changed(self.upload_source_path.as_deref(), selected) {
            let now = self.clock.now_millis();
            debug!("picture uploads source changed to {selected}; resetting last sync to {now}");
            self.handler.update_pictures_last_sync(now)?;
        }

        self.preferences
            .put_string(PREF_CAMERA_PICTURE_UPLOADS_SOURCE, selected)?;
        self.upload_source_path = Some(selected.to_string());
        Ok(())
    }

    /// Pushes the current configuration to the handler and asks it to
    /// schedule the sync job, but only while picture uploads are enabled.
    ///
    /// Returns whether scheduling was requested.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Handler`] if scheduling fails.
    pub fn schedule_picture_uploads_sync_job(&self) -> Result<bool, SettingsError> {
        let configuration = CameraUploadsConfiguration::load(self.preferences.as_ref());
        if !configuration.enabled_for_pictures {
            debug!("picture uploads disabled; not scheduling sync job");
            return Ok(false);
        }

        self.handler.set_camera_uploads_config(configuration);
        self.handler.schedule_camera_uploads_sync_job()?;
        Ok(true)
    }
}
