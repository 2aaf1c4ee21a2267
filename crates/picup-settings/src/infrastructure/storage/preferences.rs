//! File-backed preference store.
//!
//! Preferences are a flat TOML table, one key per line:
//!
//! ```toml
//! camera_picture_uploads = true
//! camera_picture_uploads_path = "/CameraUpload"
//! camera_pictures_last_sync = 1700000000000
//! ```
//!
//! # Read once, rewrite on change
//!
//! The whole file is read once on [`TomlPreferencesStore::open`] and kept in
//! memory behind a `Mutex`.  Every `put` or `remove` serialises the complete
//! table and rewrites the file, so the file always reflects the last write
//! and a second `picup` invocation sees it immediately.
//!
//! A missing file is an empty store; the file and its directory are only
//! created by the first write.  A file that is not a flat TOML table is
//! reported as [`PreferencesError::Corrupt`] rather than silently replaced.
//!
//! # Crash safety
//!
//! A rewrite goes to a sibling `<file>.tmp` first and is then renamed over
//! the real file.  A rename within one directory replaces the target in a
//! single step, so an interrupted write leaves either the old table or the
//! new one on disk, never a truncated mix that `open` would reject.
//!
//! The in-memory table is only updated after the rename succeeded, so a
//! failed write leaves both memory and disk on the previous values.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use picup_core::{PreferenceValue, PreferencesError, PreferencesStore};
use tracing::debug;

type Table = BTreeMap<String, PreferenceValue>;

/// A [`PreferencesStore`] persisted to a TOML file.
#[derive(Debug)]
pub struct TomlPreferencesStore {
    path: PathBuf,
    values: Mutex<Table>,
}

impl TomlPreferencesStore {
    /// Opens the store at `path`.  A missing file is an empty store; the file
    /// (and its directory) is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError::Io`] if the file exists but cannot be read,
    /// or [`PreferencesError::Corrupt`] if it is not a flat TOML table.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<Table>(&content).map_err(|e| {
                PreferencesError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Table::new(),
            Err(source) => return Err(PreferencesError::Io { path, source }),
        };
        debug!("loaded {} preferences from {}", values.len(), path.display());

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Applies `change` and persists the result.  The in-memory table is only
    /// updated once the file write succeeded.
    fn update(&self, change: impl FnOnce(&mut Table)) -> Result<(), PreferencesError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = values.clone();
        change(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn persist(&self, values: &Table) -> Result<(), PreferencesError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| PreferencesError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string(values).map_err(|e| PreferencesError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let staging = self.staging_path();
        std::fs::write(&staging, content).map_err(|source| PreferencesError::Io {
            path: staging.clone(),
            source,
        })?;
        std::fs::rename(&staging, &self.path).map_err(|source| {
            std::fs::remove_file(&staging).ok();
            PreferencesError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// `<file>.tmp` next to the preferences file.
    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl PreferencesStore for TomlPreferencesStore {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: PreferenceValue) -> Result<(), PreferencesError> {
        self.update(|values| {
            values.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("picup_prefs_test_{}", Uuid::new_v4()))
            .join("preferences.toml")
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_open_missing_file_yields_empty_store() {
        let path = temp_path();
        let store = TomlPreferencesStore::open(&path).expect("open");
        assert_eq!(store.get("anything"), None);
        assert!(!path.exists(), "open must not create the file");
    }

    #[test]
    fn test_values_survive_reopen() {
        // Arrange
        let path = temp_path();
        let store = TomlPreferencesStore::open(&path).unwrap();

        // Act
        store.put_bool("camera_picture_uploads", true).unwrap();
        store.put_string("camera_picture_uploads_path", "/Photos").unwrap();
        store.put_long("camera_pictures_last_sync", 1_700_000_000_000).unwrap();
        let reopened = TomlPreferencesStore::open(&path).unwrap();

        // Assert
        assert!(reopened.get_bool("camera_picture_uploads", false));
        assert_eq!(reopened.get_string("camera_picture_uploads_path", ""), "/Photos");
        assert_eq!(reopened.get_long("camera_pictures_last_sync", 0), 1_700_000_000_000);
        cleanup(&path);
    }

    #[test]
    fn test_write_leaves_no_staging_file_behind() {
        // Arrange
        let path = temp_path();
        let store = TomlPreferencesStore::open(&path).unwrap();

        // Act
        store.put_bool("camera_picture_uploads", true).unwrap();
        store.put_string("camera_picture_uploads_path", "/Photos").unwrap();

        // Assert
        assert!(path.exists());
        assert!(!store.staging_path().exists(), "staging file must be renamed away");
        assert_eq!(
            store.staging_path(),
            path.with_file_name("preferences.toml.tmp")
        );
        cleanup(&path);
    }

    #[test]
    fn test_leftover_staging_file_does_not_affect_open() {
        // Arrange: an interrupted write left a torn staging file behind
        let path = temp_path();
        TomlPreferencesStore::open(&path)
            .unwrap()
            .put_bool("camera_picture_uploads", true)
            .unwrap();
        std::fs::write(
            path.with_file_name("preferences.toml.tmp"),
            "camera_picture_uploads = tr",
        )
        .unwrap();

        // Act
        let reopened = TomlPreferencesStore::open(&path).unwrap();

        // Assert
        assert!(reopened.get_bool("camera_picture_uploads", false));
        reopened.put_bool("camera_picture_uploads", false).unwrap();
        let again = TomlPreferencesStore::open(&path).unwrap();
        assert!(!again.get_bool("camera_picture_uploads", true));
        cleanup(&path);
    }

    #[test]
    fn test_remove_is_persisted() {
        let path = temp_path();
        let store = TomlPreferencesStore::open(&path).unwrap();
        store.put_bool("flag", true).unwrap();

        store.remove("flag").unwrap();

        let reopened = TomlPreferencesStore::open(&path).unwrap();
        assert_eq!(reopened.get("flag"), None);
        cleanup(&path);
    }

    #[test]
    fn test_open_corrupt_file_returns_corrupt_error() {
        // Arrange
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not toml").unwrap();

        // Act
        let result = TomlPreferencesStore::open(&path);

        // Assert
        assert!(matches!(result, Err(PreferencesError::Corrupt { .. })));
        cleanup(&path);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        // Arrange: the store's "file" path is an existing directory
        let dir = std::env::temp_dir().join(format!("picup_prefs_dir_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = TomlPreferencesStore {
            path: dir.clone(),
            values: Mutex::new(Table::new()),
        };

        // Act
        let result = store.put_bool("flag", true);

        // Assert
        assert!(matches!(result, Err(PreferencesError::Io { .. })));
        assert_eq!(store.get("flag"), None);
        assert!(!store.staging_path().exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
