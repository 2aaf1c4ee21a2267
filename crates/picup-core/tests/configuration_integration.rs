//! Integration tests for the picup-core public API.
//!
//! These tests drive the preference store, the configuration snapshot, and
//! the source-path rule together through the crate root re-exports.

use picup_core::preferences::keys::{
    DEFAULT_SOURCE_PATH, DEFAULT_UPLOAD_PATH, PREF_CAMERA_PICTURE_UPLOADS_ENABLED,
    PREF_CAMERA_PICTURE_UPLOADS_SOURCE, PREF_CAMERA_VIDEO_UPLOADS_ENABLED,
};
use picup_core::{
    source_path_changed, BehaviourAfterUpload, CameraUploadsConfiguration, MemoryPreferences,
    PreferenceValue, PreferencesStore,
};

#[test]
fn test_configuration_reflects_latest_writes() {
    // Arrange
    let store = MemoryPreferences::new();
    store.put_bool(PREF_CAMERA_PICTURE_UPLOADS_ENABLED, true).unwrap();
    store.put_bool(PREF_CAMERA_PICTURE_UPLOADS_ENABLED, false).unwrap();
    store.put_bool(PREF_CAMERA_VIDEO_UPLOADS_ENABLED, true).unwrap();

    // Act
    let cfg = CameraUploadsConfiguration::load(&store);

    // Assert
    assert!(!cfg.enabled_for_pictures);
    assert!(cfg.enabled_for_videos);
    assert!(cfg.any_enabled());
    assert_eq!(cfg.behaviour_after_upload, BehaviourAfterUpload::Nothing);
}

#[test]
fn test_stored_source_path_compares_without_trailing_separator() {
    // Arrange
    let store = MemoryPreferences::with_values([(
        PREF_CAMERA_PICTURE_UPLOADS_SOURCE,
        PreferenceValue::Text("/storage/emulated/0/DCIM/Camera/".to_string()),
    )]);

    // Act
    let cfg = CameraUploadsConfiguration::load(&store);

    // Assert
    assert!(!source_path_changed(
        Some(&cfg.source_path_for_pictures),
        DEFAULT_SOURCE_PATH
    ));
    assert_eq!(cfg.upload_path_for_pictures, DEFAULT_UPLOAD_PATH);
}

#[test]
fn test_store_is_usable_as_trait_object() {
    let store: Box<dyn PreferencesStore> = Box::new(MemoryPreferences::new());
    store.put_long("stamp", 42).unwrap();
    assert_eq!(store.get_long("stamp", 0), 42);
}
