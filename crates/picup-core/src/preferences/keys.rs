//! Well-known preference keys and their defaults.

pub const PREF_CAMERA_PICTURE_UPLOADS_ENABLED: &str = "camera_picture_uploads";
pub const PREF_CAMERA_VIDEO_UPLOADS_ENABLED: &str = "camera_video_uploads";
pub const PREF_CAMERA_PICTURE_UPLOADS_WIFI_ONLY: &str = "camera_picture_uploads_on_wifi";
pub const PREF_CAMERA_VIDEO_UPLOADS_WIFI_ONLY: &str = "camera_video_uploads_on_wifi";
pub const PREF_CAMERA_PICTURE_UPLOADS_PATH: &str = "camera_picture_uploads_path";
pub const PREF_CAMERA_VIDEO_UPLOADS_PATH: &str = "camera_video_uploads_path";
pub const PREF_CAMERA_PICTURE_UPLOADS_SOURCE: &str = "camera_picture_uploads_source_path";
pub const PREF_CAMERA_VIDEO_UPLOADS_SOURCE: &str = "camera_video_uploads_source_path";
pub const PREF_CAMERA_UPLOADS_BEHAVIOUR: &str = "camera_uploads_behaviour";
pub const PREF_CAMERA_UPLOADS_ACCOUNT_NAME: &str = "camera_uploads_account_name";

/// Last-sync timestamps (ms since the Unix epoch) owned by the upload handler.
pub const PREF_CAMERA_PICTURES_LAST_SYNC: &str = "camera_pictures_last_sync";
pub const PREF_CAMERA_VIDEOS_LAST_SYNC: &str = "camera_videos_last_sync";

/// Remote folder uploads land in when the user never picked one.
pub const DEFAULT_UPLOAD_PATH: &str = "/CameraUpload";

/// Local camera folder watched when the user never picked one.
pub const DEFAULT_SOURCE_PATH: &str = "/storage/emulated/0/DCIM/Camera";

/// "No baseline yet" value for the last-sync timestamps.
pub const LAST_SYNC_SENTINEL: i64 = 0;
