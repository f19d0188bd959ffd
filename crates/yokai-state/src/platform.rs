use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use yokai_crypto::MasterKey;

use crate::{KeyProviderError, MemoryPreferenceStore, PreferenceStore, StoreError};

/// The one-shot platform handle the factories are initialized with.
///
/// It opens named raw stores and hands out the master key of the secure stores.
pub trait PlatformContext: Send + Sync {
    /// Opens, or creates, the raw store called `name`.
    ///
    /// Opening the same name twice must give access to the same data.
    fn open_store(&self, name: &str) -> Result<Arc<dyn PreferenceStore>, StoreError>;

    /// Establishes the master key known under `alias`, creating it on first use.
    fn master_key(&self, alias: &str) -> Result<MasterKey, KeyProviderError>;
}

/// In-process [`PlatformContext`]. Stores and keys live as long as the context does.
#[derive(Default)]
pub struct MemoryPlatformContext {
    stores: RwLock<HashMap<String, Arc<MemoryPreferenceStore>>>,
    keys: RwLock<HashMap<String, MasterKey>>,
}

impl std::fmt::Debug for MemoryPlatformContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPlatformContext").finish()
    }
}

impl MemoryPlatformContext {
    /// Creates a context without any stores or keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives direct access to the raw store called `name`, if it was opened.
    pub fn store(&self, name: &str) -> Option<Arc<MemoryPreferenceStore>> {
        self.stores
            .read()
            .expect("RwLock should not be poisoned")
            .get(name)
            .cloned()
    }
}

impl PlatformContext for MemoryPlatformContext {
    fn open_store(&self, name: &str) -> Result<Arc<dyn PreferenceStore>, StoreError> {
        let store = self
            .stores
            .write()
            .expect("RwLock should not be poisoned")
            .entry(name.to_owned())
            .or_default()
            .clone();
        Ok(store)
    }

    fn master_key(&self, alias: &str) -> Result<MasterKey, KeyProviderError> {
        Ok(self
            .keys
            .write()
            .expect("RwLock should not be poisoned")
            .entry(alias.to_owned())
            .or_insert_with(MasterKey::make)
            .clone())
    }
}
