//! Key-value preference storage.
//!
//! A [`PreferencesStore`] maps string keys to at most one [`PreferenceValue`];
//! the last write wins.  Implementations only provide raw `get`/`put`/`remove`;
//! the typed helpers (`get_bool`, `put_string`, ...) are derived from those.
//!
//! Reads never fail: a missing key, or a key holding a value of another
//! type, yields the caller's default.  Writes may fail when the backing
//! medium cannot be updated.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod keys;
pub mod memory;

/// Error type for preference writes.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// A file system I/O error occurred while persisting preferences.
    #[error("I/O error accessing preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted preferences could not be decoded or encoded.
    #[error("preferences at {path} are corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// A single persisted preference value.
///
/// Serialized untagged so a TOML preferences file reads naturally:
/// `camera_picture_uploads = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Long(i64),
    Text(String),
}

impl PreferenceValue {
    fn type_name(&self) -> &'static str {
        match self {
            PreferenceValue::Bool(_) => "bool",
            PreferenceValue::Long(_) => "long",
            PreferenceValue::Text(_) => "string",
        }
    }
}

/// Key-value persistence for user settings.
///
/// Implementations must be shareable (`Send + Sync`): the settings mediator
/// and the upload handler hold the same store behind an `Arc`.
pub trait PreferencesStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<PreferenceValue>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if the backing medium cannot be updated.
    fn put(&self, key: &str, value: PreferenceValue) -> Result<(), PreferencesError>;

    /// Removes `key`.  Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] if the backing medium cannot be updated.
    fn remove(&self, key: &str) -> Result<(), PreferencesError>;

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(PreferenceValue::Bool(value)) => value,
            Some(other) => mismatched(key, "bool", &other, default),
            None => default,
        }
    }

    fn put_bool(&self, key: &str, value: bool) -> Result<(), PreferencesError> {
        self.put(key, PreferenceValue::Bool(value))
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.get_optional_string(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`get_string`](Self::get_string) but without a fallback.
    fn get_optional_string(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(PreferenceValue::Text(value)) => Some(value),
            Some(other) => mismatched(key, "string", &other, None),
            None => None,
        }
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.put(key, PreferenceValue::Text(value.to_string()))
    }

    fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(PreferenceValue::Long(value)) => value,
            Some(other) => mismatched(key, "long", &other, default),
            None => default,
        }
    }

    fn put_long(&self, key: &str, value: i64) -> Result<(), PreferencesError> {
        self.put(key, PreferenceValue::Long(value))
    }
}

fn mismatched<T>(key: &str, expected: &str, found: &PreferenceValue, default: T) -> T {
    warn!(
        "preference '{key}' holds a {} value, expected {expected}; using default",
        found.type_name()
    );
    default
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryPreferences;
    use super::*;

    #[test]
    fn test_get_bool_returns_default_when_key_absent() {
        let store = MemoryPreferences::new();
        assert!(!store.get_bool("missing", false));
        assert!(store.get_bool("missing", true));
    }

    #[test]
    fn test_put_bool_then_get_bool_returns_same_value() {
        // Arrange
        let store = MemoryPreferences::new();

        // Act
        store.put_bool("flag", true).unwrap();

        // Assert
        assert!(store.get_bool("flag", false));
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryPreferences::new();
        store.put_string("path", "/first").unwrap();
        store.put_string("path", "/second").unwrap();
        assert_eq!(store.get_string("path", "/default"), "/second");
    }

    #[test]
    fn test_type_mismatch_falls_back_to_default() {
        // Arrange: a string stored where a bool is expected
        let store = MemoryPreferences::new();
        store.put_string("flag", "yes").unwrap();

        // Act / Assert
        assert!(store.get_bool("flag", true));
        assert_eq!(store.get_long("flag", 7), 7);
    }

    #[test]
    fn test_get_optional_string_is_none_for_absent_key() {
        let store = MemoryPreferences::new();
        assert_eq!(store.get_optional_string("account"), None);
    }

    #[test]
    fn test_remove_absent_key_is_not_an_error() {
        let store = MemoryPreferences::new();
        assert!(store.remove("never-written").is_ok());
    }

    #[test]
    fn test_preference_value_reads_untagged_toml() {
        // Arrange
        let toml_str = r#"
flag = true
stamp = 1700000000000
path = "/CameraUpload"
"#;

        // Act
        let table: std::collections::BTreeMap<String, PreferenceValue> =
            toml::from_str(toml_str).expect("deserialize");

        // Assert
        assert_eq!(table["flag"], PreferenceValue::Bool(true));
        assert_eq!(table["stamp"], PreferenceValue::Long(1_700_000_000_000));
        assert_eq!(table["path"], PreferenceValue::Text("/CameraUpload".into()));
    }
}
