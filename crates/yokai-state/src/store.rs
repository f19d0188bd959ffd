use std::{collections::HashMap, sync::RwLock};

use crate::StoreError;

/// This trait represents a raw key-value preference store, the platform collaborator every
/// [`PreferencesManager`](crate::PreferencesManager) writes through to.
///
/// Keys are used as given, namespacing is applied by the manager. Every call is an immediate
/// operation on the store: implementations must not buffer writes.
pub trait PreferenceStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Returns true if a value is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool, StoreError>;
    /// Removes the value stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process local [`PreferenceStore`]. Values live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values
            .read()
            .expect("RwLock should not be poisoned")
            .len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.values
            .read()
            .expect("RwLock should not be poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .contains_key(key))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryPreferenceStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1".to_string()).unwrap();
        assert!(store.contains("a").unwrap());
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));

        store.set("a", "2".to_string()).unwrap();
        assert_eq!(store.get("a").unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert!(!store.contains("a").unwrap());
        assert!(store.is_empty());
    }
}
