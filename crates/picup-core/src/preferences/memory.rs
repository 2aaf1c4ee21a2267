//! In-memory preference store.
//!
//! Used by unit and integration tests across the workspace, where nothing
//! should touch the disk.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use super::{PreferenceValue, PreferencesError, PreferencesStore};

/// A [`PreferencesStore`] that keeps every value in a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, PreferenceValue>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `values`.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, PreferenceValue)>,
        K: Into<String>,
    {
        Self {
            values: Mutex::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Returns a copy of every stored entry.
    pub fn snapshot(&self) -> BTreeMap<String, PreferenceValue> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PreferencesStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<PreferenceValue> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: PreferenceValue) -> Result<(), PreferencesError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_values_prepopulates_store() {
        let store = MemoryPreferences::with_values([("a", PreferenceValue::Long(3))]);
        assert_eq!(store.get("a"), Some(PreferenceValue::Long(3)));
    }

    #[test]
    fn test_remove_deletes_key() {
        // Arrange
        let store = MemoryPreferences::new();
        store.put("k", PreferenceValue::Bool(true)).unwrap();

        // Act
        store.remove("k").unwrap();

        // Assert
        assert_eq!(store.get("k"), None);
        assert!(store.snapshot().is_empty());
    }
}
