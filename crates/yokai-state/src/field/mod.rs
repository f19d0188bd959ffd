//! Typed values bound to one key of one namespace.

pub(crate) mod codec;
mod group;

use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::{Arc, RwLock},
};

pub use codec::{FieldCodec, JsonCodec, PlainCodec};
pub use group::{StorageEntry, StorageGroup};
use serde::{de::DeserializeOwned, Serialize};

use crate::{ManagerFactory, PreferencesManager, StorageError};

/// A typed, lazily loaded and cached value persisted under `key` in namespace `id`.
///
/// The first [`get`](StorageField::get) reads the backend. If nothing is stored yet the initial
/// value is returned and written through, so the key exists from then on. Later reads are served
/// from the cache; [`set`](StorageField::set) writes the backend first and the cache second.
///
/// A stored value that fails to parse is an error. The field never falls back to its initial
/// value in that case.
///
/// ```
/// # use std::sync::Arc;
/// # use yokai_state::{MemoryPlatformContext, StateContext, StorageField};
/// let state = StateContext::default();
/// state.init(Arc::new(MemoryPlatformContext::new()))?;
///
/// let threads = StorageField::new(state.plain().clone(), "downloads", "threads", 4);
/// assert_eq!(threads.get()?, 4);
///
/// threads.set(8)?;
/// assert_eq!(threads.get()?, 8);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StorageField<T> {
    factory: Arc<ManagerFactory>,
    id: String,
    key: String,
    init_value: T,
    codec: Arc<dyn FieldCodec<T>>,
    cache: RwLock<Option<T>>,
}

impl<T> fmt::Debug for StorageField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageField")
            .field("id", &self.id)
            .field("key", &self.key)
            .finish()
    }
}

impl<T> StorageField<T>
where
    T: FromStr + Display + Clone + Send + Sync + 'static,
    T::Err: Display,
{
    /// Creates a field stored in its text form.
    pub fn new(
        factory: Arc<ManagerFactory>,
        id: impl Into<String>,
        key: impl Into<String>,
        init_value: T,
    ) -> Self {
        Self::with_codec(factory, id, key, init_value, Arc::new(PlainCodec))
    }
}

impl<T> StorageField<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates a field stored as JSON.
    pub fn json(
        factory: Arc<ManagerFactory>,
        id: impl Into<String>,
        key: impl Into<String>,
        init_value: T,
    ) -> Self {
        Self::with_codec(factory, id, key, init_value, Arc::new(JsonCodec))
    }
}

impl<T> StorageField<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a field with a custom codec.
    pub fn with_codec(
        factory: Arc<ManagerFactory>,
        id: impl Into<String>,
        key: impl Into<String>,
        init_value: T,
        codec: Arc<dyn FieldCodec<T>>,
    ) -> Self {
        Self {
            factory,
            id: id.into(),
            key: key.into(),
            init_value,
            codec,
            cache: RwLock::new(None),
        }
    }

    /// The namespace id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The key within the namespace.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value supplied while nothing is stored.
    pub fn init_value(&self) -> &T {
        &self.init_value
    }

    /// Returns true once the value was loaded into the cache.
    pub fn is_loaded(&self) -> bool {
        self.cache
            .read()
            .expect("RwLock should not be poisoned")
            .is_some()
    }

    /// Current value of the field.
    pub fn get(&self) -> Result<T, StorageError> {
        if let Some(value) = self
            .cache
            .read()
            .expect("RwLock should not be poisoned")
            .as_ref()
        {
            return Ok(value.clone());
        }

        let manager = self.manager()?;
        let value = match manager.get(&self.key)? {
            Some(raw) => self.codec.deserialize(&raw)?,
            None => {
                manager.set_string(&self.key, self.codec.serialize(&self.init_value)?)?;
                self.init_value.clone()
            }
        };

        *self.cache.write().expect("RwLock should not be poisoned") = Some(value.clone());
        Ok(value)
    }

    /// Writes `value` through to the backend, then caches it.
    pub fn set(&self, value: T) -> Result<(), StorageError> {
        let raw = self.codec.serialize(&value)?;
        self.manager()?.set_string(&self.key, raw)?;

        *self.cache.write().expect("RwLock should not be poisoned") = Some(value);
        Ok(())
    }

    /// Stores the initial value again.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.set(self.init_value.clone())
    }

    /// Deletes the stored value and empties the cache. The next read supplies the initial value.
    pub fn remove(&self) -> Result<(), StorageError> {
        self.manager()?.remove(&self.key)?;

        *self.cache.write().expect("RwLock should not be poisoned") = None;
        Ok(())
    }

    /// The stored string form of the current value.
    pub fn raw_value(&self) -> Result<String, StorageError> {
        let value = self.get()?;
        Ok(self.codec.serialize(&value)?)
    }

    fn manager(&self) -> Result<Arc<PreferencesManager>, StorageError> {
        Ok(self.factory.create(&self.id)?)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::{
        CodecError, FactoryError, FactoryKind, MemoryPlatformContext, PreferenceStore,
        StateConfiguration, StateContext,
    };

    fn state() -> (StateContext, Arc<MemoryPlatformContext>) {
        let context = Arc::new(MemoryPlatformContext::new());
        let state = StateContext::default();
        state.init(context.clone()).unwrap();
        (state, context)
    }

    #[test]
    fn test_first_read_supplies_and_persists_init_value() {
        let (state, _) = state();
        let field = StorageField::new(state.plain().clone(), "yokai", "path", "/tmp".to_string());

        let manager = state.plain().create("yokai").unwrap();
        assert!(!manager.contains("path").unwrap());
        assert!(!field.is_loaded());

        assert_eq!(field.get().unwrap(), "/tmp");
        assert!(field.is_loaded());
        assert!(manager.contains("path").unwrap());
        assert_eq!(manager.get_string("path", "").unwrap(), "/tmp");
    }

    #[test]
    fn test_existing_value_is_loaded() {
        let (state, _) = state();
        state
            .plain()
            .create("yokai")
            .unwrap()
            .set_string("threads", "12")
            .unwrap();

        let field = StorageField::new(state.plain().clone(), "yokai", "threads", 4);
        assert_eq!(field.get().unwrap(), 12);
    }

    #[test]
    fn test_set_round_trips_through_fresh_field() {
        let (state, _) = state();
        let field = StorageField::new(state.plain().clone(), "yokai", "enabled", false);
        field.set(true).unwrap();
        assert!(field.get().unwrap());

        let fresh = StorageField::new(state.plain().clone(), "yokai", "enabled", false);
        assert!(fresh.get().unwrap());
    }

    #[test]
    fn test_reads_are_served_from_cache() {
        let (state, context) = state();
        let field = StorageField::new(state.plain().clone(), "yokai", "threads", 4);
        assert_eq!(field.get().unwrap(), 4);

        // Bypass the field entirely.
        context
            .store("common_prefs")
            .unwrap()
            .set("yokai_threads", "99".to_string())
            .unwrap();
        assert_eq!(field.get().unwrap(), 4);
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let (state, _) = state();
        state
            .plain()
            .create("yokai")
            .unwrap()
            .set_string("threads", "lots")
            .unwrap();

        let field = StorageField::new(state.plain().clone(), "yokai", "threads", 4);
        let err = field.get().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Codec(CodecError::Deserialization { ref raw, target: "i32", .. })
                if raw == "lots"
        ));
        assert!(!field.is_loaded());
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let (state, _) = state();
        let first = StorageField::new(state.plain().clone(), "first", "key", 1);
        let second = StorageField::new(state.plain().clone(), "second", "key", 2);

        first.set(10).unwrap();
        assert_eq!(second.get().unwrap(), 2);
        assert_eq!(first.get().unwrap(), 10);
    }

    #[test]
    fn test_remove_and_reset() {
        let (state, _) = state();
        let field = StorageField::new(state.plain().clone(), "yokai", "name", "init".to_string());
        field.set("changed".to_string()).unwrap();

        field.reset().unwrap();
        assert_eq!(field.get().unwrap(), "init");

        field.set("changed".to_string()).unwrap();
        field.remove().unwrap();
        assert!(!field.is_loaded());
        assert!(!state.plain().create("yokai").unwrap().contains("name").unwrap());
        assert_eq!(field.get().unwrap(), "init");
    }

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    enum Theme {
        Light,
        Dark,
    }

    #[test]
    fn test_json_field() {
        let (state, _) = state();
        let field = StorageField::json(state.plain().clone(), "yokai", "theme", Theme::Light);
        assert_eq!(field.get().unwrap(), Theme::Light);
        assert_eq!(field.raw_value().unwrap(), r#""Light""#);

        field.set(Theme::Dark).unwrap();
        let fresh = StorageField::json(state.plain().clone(), "yokai", "theme", Theme::Light);
        assert_eq!(fresh.get().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_secure_field() {
        let (state, context) = state();
        let field = StorageField::new(state.secure().clone(), "yokai", "password", String::new());
        field.set("hunter2".to_string()).unwrap();

        let fresh = StorageField::new(state.secure().clone(), "yokai", "password", String::new());
        assert_eq!(fresh.get().unwrap(), "hunter2");
        assert!(context.store("common_prefs").is_none());
    }

    #[test]
    fn test_uninitialized_factory() {
        let factory = Arc::new(ManagerFactory::new(
            FactoryKind::Plain,
            StateConfiguration::default(),
        ));
        let field = StorageField::new(factory, "yokai", "threads", 4);

        assert!(matches!(
            field.get(),
            Err(StorageError::Factory(FactoryError::Uninitialized(
                FactoryKind::Plain
            )))
        ));
    }
}
