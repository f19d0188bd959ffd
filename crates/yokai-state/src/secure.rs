use std::sync::Arc;

use yokai_crypto::PreferenceKeys;

use crate::{PreferenceStore, StoreError};

/// A [`PreferenceStore`] that encrypts everything it writes to an inner store.
///
/// Key names are replaced by their keyed hash, values are sealed with the store's own keys and
/// bound to the hashed name, so a value copied to another entry no longer opens.
pub struct EncryptedPreferenceStore {
    inner: Arc<dyn PreferenceStore>,
    keys: PreferenceKeys,
}

impl std::fmt::Debug for EncryptedPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedPreferenceStore").finish()
    }
}

impl EncryptedPreferenceStore {
    /// Wraps `inner`, encrypting with `keys`.
    pub fn new(inner: Arc<dyn PreferenceStore>, keys: PreferenceKeys) -> Self {
        Self { inner, keys }
    }
}

impl PreferenceStore for EncryptedPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let name = self.keys.hash_name(key)?;
        let Some(sealed) = self.inner.get(&name)? else {
            return Ok(None);
        };

        let plaintext = self.keys.open(&sealed, name.as_bytes())?;
        String::from_utf8(plaintext)
            .map(Some)
            .map_err(|_| StoreError::Internal(format!("Value of '{key}' is not valid UTF-8")))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let name = self.keys.hash_name(key)?;
        let sealed = self.keys.seal(value.as_bytes(), name.as_bytes())?;
        self.inner.set(&name, sealed)
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.contains(&self.keys.hash_name(key)?)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(&self.keys.hash_name(key)?)
    }
}
