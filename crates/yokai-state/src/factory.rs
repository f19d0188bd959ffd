use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock, RwLock},
};

use yokai_crypto::PreferenceKeys;

use crate::{
    EncryptedPreferenceStore, FactoryError, PlatformContext, PreferencesManager,
    StateConfiguration,
};

/// Which kind of backing store a [`ManagerFactory`] hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    /// All namespaces share one plain store.
    Plain,
    /// Every namespace gets its own encrypted store.
    Secure,
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryKind::Plain => write!(f, "ManagerFactory"),
            FactoryKind::Secure => write!(f, "SecureManagerFactory"),
        }
    }
}

/// Caches one [`PreferencesManager`] per namespace id.
///
/// Managers are built lazily on the first [`create`](ManagerFactory::create) of an id and the same
/// instance is returned afterwards. Two factories never share managers, even for the same id.
pub struct ManagerFactory {
    kind: FactoryKind,
    configuration: StateConfiguration,
    context: OnceLock<Arc<dyn PlatformContext>>,
    managers: RwLock<HashMap<String, Arc<PreferencesManager>>>,
}

impl fmt::Debug for ManagerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerFactory")
            .field("kind", &self.kind)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl ManagerFactory {
    /// Creates an uninitialized factory.
    pub fn new(kind: FactoryKind, configuration: StateConfiguration) -> Self {
        Self {
            kind,
            configuration,
            context: OnceLock::new(),
            managers: RwLock::new(HashMap::new()),
        }
    }

    /// The kind of stores this factory opens.
    pub fn kind(&self) -> FactoryKind {
        self.kind
    }

    /// Supplies the platform context. Can only be done once.
    pub fn init(&self, context: Arc<dyn PlatformContext>) -> Result<(), FactoryError> {
        self.context
            .set(context)
            .map_err(|_| FactoryError::AlreadyInitialized(self.kind))
    }

    /// Returns true once [`init`](ManagerFactory::init) succeeded.
    pub fn is_initialized(&self) -> bool {
        self.context.get().is_some()
    }

    /// Returns the manager of namespace `id`, constructing it on first use.
    pub fn create(&self, id: &str) -> Result<Arc<PreferencesManager>, FactoryError> {
        let context = self
            .context
            .get()
            .ok_or(FactoryError::Uninitialized(self.kind))?;

        if let Some(manager) = self
            .managers
            .read()
            .expect("RwLock should not be poisoned")
            .get(id)
        {
            return Ok(manager.clone());
        }

        let mut managers = self.managers.write().expect("RwLock should not be poisoned");
        // Another caller may have built it between the two locks.
        if let Some(manager) = managers.get(id) {
            return Ok(manager.clone());
        }

        let manager = Arc::new(self.build(context.as_ref(), id)?);
        managers.insert(id.to_owned(), manager.clone());
        Ok(manager)
    }

    fn build(
        &self,
        context: &dyn PlatformContext,
        id: &str,
    ) -> Result<PreferencesManager, FactoryError> {
        match self.kind {
            FactoryKind::Plain => {
                log::debug!("Creating preferences manager for namespace {id}");
                let store = context.open_store(&self.configuration.common_store_name)?;
                Ok(PreferencesManager::new(id, store))
            }
            FactoryKind::Secure => {
                let store_name = self.configuration.secure_store_name(id);
                log::debug!("Creating secure preferences manager for namespace {id}");

                let master_key = context
                    .master_key(&self.configuration.master_key_alias)
                    .inspect_err(|e| log::error!("Failed to establish master key: {e}"))?;
                let keys = PreferenceKeys::derive(&master_key, &store_name)?;
                let inner = context.open_store(&store_name)?;

                Ok(PreferencesManager::new(
                    id,
                    Arc::new(EncryptedPreferenceStore::new(inner, keys)),
                ))
            }
        }
    }
}
