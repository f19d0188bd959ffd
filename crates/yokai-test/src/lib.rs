#![doc = include_str!("../README.md")]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

use yokai_crypto::MasterKey;
use yokai_state::{
    KeyProviderError, MemoryPreferenceStore, PlatformContext, PreferenceStore, StateContext,
    StoreError,
};

/// A [`PreferenceStore`] that rejects every operation.
#[derive(Debug, Default)]
pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Internal("store unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Internal("store unavailable".to_string()))
    }

    fn contains(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Internal("store unavailable".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Internal("store unavailable".to_string()))
    }
}

/// In-memory store that counts reads and writes.
#[derive(Debug, Default)]
pub struct CountingPreferenceStore {
    inner: MemoryPreferenceStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingPreferenceStore {
    /// Number of `get` and `contains` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `set` and `remove` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value under `key`, without counting the access.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }

    /// Stores `value` under the raw `key`, without counting the access.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner
            .set(key, value.to_string())
            .expect("memory store should not fail");
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl PreferenceStore for CountingPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.contains(key)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key)
    }
}

/// Configurable [`PlatformContext`] for tests.
///
/// By default it behaves like a healthy platform. [`TestPlatformContext::without_master_key`]
/// simulates a missing key provider and [`TestPlatformContext::with_failing_stores`] a store that
/// cannot be opened.
#[derive(Default)]
pub struct TestPlatformContext {
    stores: RwLock<HashMap<String, Arc<CountingPreferenceStore>>>,
    master_key: Option<MasterKey>,
    keyless: bool,
    failing_stores: bool,
    opened: AtomicUsize,
    key_requests: AtomicUsize,
}

impl std::fmt::Debug for TestPlatformContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestPlatformContext")
            .field("keyless", &self.keyless)
            .field("failing_stores", &self.failing_stores)
            .finish()
    }
}

impl TestPlatformContext {
    /// A healthy platform with a fresh master key.
    pub fn new() -> Self {
        Self {
            master_key: Some(MasterKey::make()),
            ..Default::default()
        }
    }

    /// A platform whose key provider always fails.
    pub fn without_master_key() -> Self {
        Self {
            keyless: true,
            ..Default::default()
        }
    }

    /// A platform whose stores cannot be opened.
    pub fn with_failing_stores() -> Self {
        Self {
            master_key: Some(MasterKey::make()),
            failing_stores: true,
            ..Default::default()
        }
    }

    /// The raw store called `name`, created if needed.
    pub fn store(&self, name: &str) -> Arc<CountingPreferenceStore> {
        self.stores
            .write()
            .expect("RwLock should not be poisoned")
            .entry(name.to_owned())
            .or_default()
            .clone()
    }

    /// Returns true if a store called `name` was created.
    pub fn has_store(&self, name: &str) -> bool {
        self.stores
            .read()
            .expect("RwLock should not be poisoned")
            .contains_key(name)
    }

    /// Number of successful `open_store` calls.
    pub fn opened_stores(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of `master_key` calls.
    pub fn key_requests(&self) -> usize {
        self.key_requests.load(Ordering::SeqCst)
    }
}

impl PlatformContext for TestPlatformContext {
    fn open_store(&self, name: &str) -> Result<Arc<dyn PreferenceStore>, StoreError> {
        if self.failing_stores {
            return Err(StoreError::Internal(format!("cannot open {name}")));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(self.store(name))
    }

    fn master_key(&self, alias: &str) -> Result<MasterKey, KeyProviderError> {
        self.key_requests.fetch_add(1, Ordering::SeqCst);
        match (&self.master_key, self.keyless) {
            (Some(key), false) => Ok(key.clone()),
            _ => Err(KeyProviderError {
                alias: alias.to_owned(),
                reason: "keystore unavailable".to_owned(),
            }),
        }
    }
}

/// A [`StateContext`] initialized with a healthy [`TestPlatformContext`].
pub fn initialized_state() -> (Arc<StateContext>, Arc<TestPlatformContext>) {
    initialized_state_with(TestPlatformContext::new())
}

/// A [`StateContext`] initialized with `context`.
pub fn initialized_state_with(
    context: TestPlatformContext,
) -> (Arc<StateContext>, Arc<TestPlatformContext>) {
    let context = Arc::new(context);
    let state = StateContext::default();
    state
        .init(context.clone())
        .expect("a fresh state context should accept its first init");
    (Arc::new(state), context)
}
