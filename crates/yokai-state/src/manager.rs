use std::sync::Arc;

use crate::{field::codec::FieldCodec, PlainCodec, PreferenceStore, StorageError, StoreError};

/// Persistence backend of a single namespace.
///
/// Every key is stored as `"{id}_{key}"` in the underlying [`PreferenceStore`], so namespaces
/// sharing a store never collide. Managers are handed out by a
/// [`ManagerFactory`](crate::ManagerFactory), one per namespace.
pub struct PreferencesManager {
    id: String,
    store: Arc<dyn PreferenceStore>,
}

impl std::fmt::Debug for PreferencesManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesManager")
            .field("id", &self.id)
            .finish()
    }
}

impl PreferencesManager {
    /// Creates the manager of namespace `id` on top of `store`.
    pub fn new(id: impl Into<String>, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            id: id.into(),
            store,
        }
    }

    /// The namespace identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The key `key` is stored under.
    pub fn namespaced_key(&self, key: &str) -> String {
        format!("{}_{}", self.id, key)
    }

    /// Writes `value` under `key`.
    pub fn set_string(&self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.store.set(&self.namespaced_key(key), value.into())
    }

    /// Reads the value under `key`, or `default` if nothing is stored.
    pub fn get_string(&self, key: &str, default: &str) -> Result<String, StoreError> {
        Ok(self
            .store
            .get(&self.namespaced_key(key))?
            .unwrap_or_else(|| default.to_owned()))
    }

    /// Reads the value under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.store.get(&self.namespaced_key(key))
    }

    /// Returns true if a value is stored under `key`.
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        self.store.contains(&self.namespaced_key(key))
    }

    /// Deletes the value under `key`.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(&self.namespaced_key(key))
    }

    /// Writes an `i32` under `key`.
    pub fn set_int(&self, key: &str, value: i32) -> Result<(), StorageError> {
        self.set_typed(key, &value)
    }

    /// Reads an `i32`, or `default` if nothing is stored.
    pub fn get_int(&self, key: &str, default: i32) -> Result<i32, StorageError> {
        self.get_typed(key, default)
    }

    /// Writes an `i64` under `key`.
    pub fn set_long(&self, key: &str, value: i64) -> Result<(), StorageError> {
        self.set_typed(key, &value)
    }

    /// Reads an `i64`, or `default` if nothing is stored.
    pub fn get_long(&self, key: &str, default: i64) -> Result<i64, StorageError> {
        self.get_typed(key, default)
    }

    /// Writes an `f32` under `key`.
    pub fn set_float(&self, key: &str, value: f32) -> Result<(), StorageError> {
        self.set_typed(key, &value)
    }

    /// Reads an `f32`, or `default` if nothing is stored.
    pub fn get_float(&self, key: &str, default: f32) -> Result<f32, StorageError> {
        self.get_typed(key, default)
    }

    /// Writes a `bool` under `key`.
    pub fn set_bool(&self, key: &str, value: bool) -> Result<(), StorageError> {
        self.set_typed(key, &value)
    }

    /// Reads a `bool`, or `default` if nothing is stored.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, StorageError> {
        self.get_typed(key, default)
    }

    fn set_typed<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        PlainCodec: FieldCodec<T>,
    {
        let raw = PlainCodec.serialize(value)?;
        self.set_string(key, raw)?;
        Ok(())
    }

    fn get_typed<T>(&self, key: &str, default: T) -> Result<T, StorageError>
    where
        PlainCodec: FieldCodec<T>,
    {
        match self.get(key)? {
            Some(raw) => Ok(PlainCodec.deserialize(&raw)?),
            None => Ok(default),
        }
    }
}
