use std::sync::Arc;

use crate::{FactoryError, FactoryKind, ManagerFactory, PlatformContext, StateConfiguration};

/// Owns the plain and the secure [`ManagerFactory`] of an application.
///
/// Create one at startup, [`init`](StateContext::init) it with the platform context and pass it to
/// whatever declares storage fields. The namespace caches live as long as the context does.
#[derive(Debug)]
pub struct StateContext {
    plain: Arc<ManagerFactory>,
    secure: Arc<ManagerFactory>,
}

impl Default for StateContext {
    fn default() -> Self {
        Self::new(StateConfiguration::default())
    }
}

impl StateContext {
    /// Creates both factories, uninitialized.
    pub fn new(configuration: StateConfiguration) -> Self {
        Self {
            plain: Arc::new(ManagerFactory::new(
                FactoryKind::Plain,
                configuration.clone(),
            )),
            secure: Arc::new(ManagerFactory::new(FactoryKind::Secure, configuration)),
        }
    }

    /// Initializes both factories with the same platform context.
    pub fn init(&self, context: Arc<dyn PlatformContext>) -> Result<(), FactoryError> {
        self.plain.init(context.clone())?;
        self.secure.init(context)?;
        Ok(())
    }

    /// Factory of the plain stores.
    pub fn plain(&self) -> &Arc<ManagerFactory> {
        &self.plain
    }

    /// Factory of the encrypted stores.
    pub fn secure(&self) -> &Arc<ManagerFactory> {
        &self.secure
    }

    /// Factory of the given kind.
    pub fn factory(&self, kind: FactoryKind) -> &Arc<ManagerFactory> {
        match kind {
            FactoryKind::Plain => &self.plain,
            FactoryKind::Secure => &self.secure,
        }
    }
}
