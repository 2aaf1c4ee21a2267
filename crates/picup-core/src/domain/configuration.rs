//! Camera-uploads configuration snapshot.
//!
//! [`CameraUploadsConfiguration`] gathers every camera-uploads preference
//! into one value.  The upload handler uses it to decide whether a sync job
//! is needed at all and what that job should watch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::preferences::keys::*;
use crate::preferences::PreferencesStore;

/// What happens to a local file once it has been uploaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviourAfterUpload {
    /// Keep the file in its original folder.
    #[default]
    Nothing,
    /// Move the file into the app's local storage.
    Move,
}

impl BehaviourAfterUpload {
    /// The value persisted under the behaviour preference key.
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviourAfterUpload::Nothing => "NOTHING",
            BehaviourAfterUpload::Move => "MOVE",
        }
    }
}

impl fmt::Display for BehaviourAfterUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown behaviour after upload: {0}")]
pub struct UnknownBehaviour(pub String);

impl FromStr for BehaviourAfterUpload {
    type Err = UnknownBehaviour;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NOTHING" => Ok(BehaviourAfterUpload::Nothing),
            "MOVE" => Ok(BehaviourAfterUpload::Move),
            _ => Err(UnknownBehaviour(s.to_string())),
        }
    }
}

/// Every camera-uploads preference, read at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraUploadsConfiguration {
    pub enabled_for_pictures: bool,
    pub enabled_for_videos: bool,
    pub wifi_only_for_pictures: bool,
    pub wifi_only_for_videos: bool,
    pub upload_account_name: Option<String>,
    pub upload_path_for_pictures: String,
    pub upload_path_for_videos: String,
    pub source_path_for_pictures: String,
    pub source_path_for_videos: String,
    pub behaviour_after_upload: BehaviourAfterUpload,
}

impl Default for CameraUploadsConfiguration {
    fn default() -> Self {
        Self {
            enabled_for_pictures: false,
            enabled_for_videos: false,
            wifi_only_for_pictures: false,
            wifi_only_for_videos: false,
            upload_account_name: None,
            upload_path_for_pictures: DEFAULT_UPLOAD_PATH.to_string(),
            upload_path_for_videos: DEFAULT_UPLOAD_PATH.to_string(),
            source_path_for_pictures: DEFAULT_SOURCE_PATH.to_string(),
            source_path_for_videos: DEFAULT_SOURCE_PATH.to_string(),
            behaviour_after_upload: BehaviourAfterUpload::Nothing,
        }
    }
}

impl CameraUploadsConfiguration {
    /// Reads the current configuration from `store`, applying defaults for
    /// every key that has never been written.
    pub fn load(store: &dyn PreferencesStore) -> Self {
        Self {
            enabled_for_pictures: store.get_bool(PREF_CAMERA_PICTURE_UPLOADS_ENABLED, false),
            enabled_for_videos: store.get_bool(PREF_CAMERA_VIDEO_UPLOADS_ENABLED, false),
            wifi_only_for_pictures: store.get_bool(PREF_CAMERA_PICTURE_UPLOADS_WIFI_ONLY, false),
            wifi_only_for_videos: store.get_bool(PREF_CAMERA_VIDEO_UPLOADS_WIFI_ONLY, false),
            upload_account_name: store.get_optional_string(PREF_CAMERA_UPLOADS_ACCOUNT_NAME),
            upload_path_for_pictures: store
                .get_string(PREF_CAMERA_PICTURE_UPLOADS_PATH, DEFAULT_UPLOAD_PATH),
            upload_path_for_videos: store
                .get_string(PREF_CAMERA_VIDEO_UPLOADS_PATH, DEFAULT_UPLOAD_PATH),
            source_path_for_pictures: store
                .get_string(PREF_CAMERA_PICTURE_UPLOADS_SOURCE, DEFAULT_SOURCE_PATH),
            source_path_for_videos: store
                .get_string(PREF_CAMERA_VIDEO_UPLOADS_SOURCE, DEFAULT_SOURCE_PATH),
            behaviour_after_upload: load_behaviour(store),
        }
    }

    /// `true` when at least one media kind is enabled.
    pub fn any_enabled(&self) -> bool {
        self.enabled_for_pictures || self.enabled_for_videos
    }
}

/// Reads the behaviour preference, falling back to
/// [`BehaviourAfterUpload::Nothing`] for absent or unrecognised values.
pub fn load_behaviour(store: &dyn PreferencesStore) -> BehaviourAfterUpload {
    match store.get_optional_string(PREF_CAMERA_UPLOADS_BEHAVIOUR) {
        Some(raw) => raw.parse().unwrap_or_else(|e: UnknownBehaviour| {
            warn!("{e}; falling back to {}", BehaviourAfterUpload::Nothing);
            BehaviourAfterUpload::Nothing
        }),
        None => BehaviourAfterUpload::Nothing,
    }
}
