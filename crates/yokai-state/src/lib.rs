#![doc = include_str!("../README.md")]

mod configuration;
mod error;
mod factory;
/// Typed storage fields and their codecs.
pub mod field;
mod manager;
mod platform;
mod secure;
mod state;
mod store;

pub use configuration::StateConfiguration;
pub use error::{CodecError, FactoryError, KeyProviderError, StorageError, StoreError};
pub use factory::{FactoryKind, ManagerFactory};
pub use field::{FieldCodec, JsonCodec, PlainCodec, StorageEntry, StorageField, StorageGroup};
pub use manager::PreferencesManager;
pub use platform::{MemoryPlatformContext, PlatformContext};
pub use secure::EncryptedPreferenceStore;
pub use state::StateContext;
pub use store::{MemoryPreferenceStore, PreferenceStore};
