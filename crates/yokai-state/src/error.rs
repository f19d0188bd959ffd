use thiserror::Error;
use yokai_crypto::CryptoError;

use crate::factory::FactoryKind;

/// An error resulting from operations on a [`PreferenceStore`](crate::PreferenceStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// An internal unspecified error of the backing store.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A value of an encrypted store could not be sealed or opened.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// The platform could not provide the master key of the secure stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Key material for '{alias}' is unavailable: {reason}")]
pub struct KeyProviderError {
    /// Alias the key was requested under.
    pub alias: String,
    /// Platform supplied reason.
    pub reason: String,
}

/// Failure to convert a field value to or from its stored string form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The stored string does not parse to the field's type.
    #[error("Cannot deserialize '{raw}' to {target}: {reason}")]
    Deserialization {
        /// The raw stored string.
        raw: String,
        /// Name of the target type.
        target: &'static str,
        /// Parser supplied reason.
        reason: String,
    },

    /// The value could not be turned into a string.
    #[error("Cannot serialize {target}: {reason}")]
    Serialization {
        /// Name of the source type.
        target: &'static str,
        /// Serializer supplied reason.
        reason: String,
    },
}

/// Errors of the [`ManagerFactory`](crate::ManagerFactory).
#[derive(Debug, Error)]
pub enum FactoryError {
    /// `create` was called before `init`.
    #[error("{0} is not initialized. Call init(context) first.")]
    Uninitialized(FactoryKind),

    /// `init` was called a second time.
    #[error("{0} is already initialized")]
    AlreadyInitialized(FactoryKind),

    /// Key material of the secure store could not be established.
    #[error("Security provider error: {0}")]
    SecurityProvider(#[from] KeyProviderError),

    /// The per-store keys could not be derived.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The backing store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur when reading or writing a [`StorageField`](crate::StorageField).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend of the field's namespace could not be created.
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// The stored value could not be converted.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The backend failed to read or write.
    #[error(transparent)]
    Store(#[from] StoreError),
}
