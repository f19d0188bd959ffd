use std::pin::Pin;

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use generic_array::{typenum::U32, GenericArray};
use hmac::{Hmac, Mac};
use rand::Rng;
use subtle::{Choice, ConstantTimeEq};
use zeroize::ZeroizeOnDrop;

use crate::{
    util::hkdf_expand,
    xchacha20::{self, NONCE_SIZE},
    CryptoError, Result,
};

const KEY_LEN: usize = 32;

/// Root key of the secure preference stores.
///
/// A single master key is established per application by the platform context. Stores never use it
/// directly, they derive their own [`PreferenceKeys`] from it.
#[derive(ZeroizeOnDrop, Clone)]
pub struct MasterKey {
    /// Uses a pinned heap data structure, as noted in [Pinned heap data][crate#pinned-heap-data]
    key: Pin<Box<GenericArray<u8, U32>>>,
}

impl MasterKey {
    /// Generate a new random [MasterKey]
    pub fn generate(mut rng: impl rand::RngCore) -> Self {
        let mut key = Box::pin(GenericArray::<u8, U32>::default());
        rng.fill(key.as_mut_slice());
        MasterKey { key }
    }

    /// Generate a new random [MasterKey] using the thread-local CSPRNG.
    pub fn make() -> Self {
        Self::generate(rand::thread_rng())
    }

    /// Restore a master key from its raw 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut key = Box::pin(GenericArray::<u8, U32>::default());
        key.copy_from_slice(bytes);
        Ok(MasterKey { key })
    }
}

impl ConstantTimeEq for MasterKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.key.ct_eq(&other.key)
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey").finish()
    }
}

/// Keys of a single encrypted preference store, derived from the [MasterKey].
///
/// `name_key` produces deterministic, opaque storage names for preference keys. `enc_key` seals the
/// values.
#[derive(ZeroizeOnDrop)]
pub struct PreferenceKeys {
    /// Uses a pinned heap data structure, as noted in [Pinned heap data][crate#pinned-heap-data]
    name_key: Pin<Box<GenericArray<u8, U32>>>,
    /// Uses a pinned heap data structure, as noted in [Pinned heap data][crate#pinned-heap-data]
    enc_key: Pin<Box<GenericArray<u8, U32>>>,
}

impl PreferenceKeys {
    /// Derive the keys of the store called `store_name`.
    ///
    /// Different store names always produce unrelated keys.
    pub fn derive(master: &MasterKey, store_name: &str) -> Result<Self> {
        Ok(PreferenceKeys {
            name_key: hkdf_expand(&master.key, &format!("yokai-prefs-name:{store_name}"))?,
            enc_key: hkdf_expand(&master.key, &format!("yokai-prefs-value:{store_name}"))?,
        })
    }

    /// Map a plain preference key to the opaque name it is stored under.
    pub fn hash_name(&self, name: &str) -> Result<String> {
        let mut mac = Hmac::<sha2::Sha256>::new_from_slice(&self.name_key)
            .map_err(|_| CryptoError::KeyDerivation)?;
        mac.update(name.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    /// Encrypt `plaintext`, binding it to `associated_data`.
    ///
    /// The output is `base64(nonce || ciphertext)`.
    pub fn seal(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<String> {
        let nonce: [u8; NONCE_SIZE] = xchacha20::generate_nonce().into();
        let ciphertext = xchacha20::encrypt_xchacha20_poly1305(
            &nonce,
            &self.enc_key,
            plaintext,
            associated_data,
        )?;

        let mut buffer = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        buffer.extend_from_slice(&nonce);
        buffer.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(buffer))
    }

    /// Decrypt a value produced by [`PreferenceKeys::seal`] with the same associated data.
    pub fn open(&self, sealed: &str, associated_data: &[u8]) -> Result<Vec<u8>> {
        let buffer = STANDARD
            .decode(sealed)
            .map_err(|_| CryptoError::Encoding("invalid base64"))?;
        if buffer.len() < NONCE_SIZE {
            return Err(CryptoError::Encoding("missing nonce"));
        }
        let (nonce, ciphertext) = buffer.split_at(NONCE_SIZE);
        let nonce: [u8; NONCE_SIZE] = nonce
            .try_into()
            .map_err(|_| CryptoError::Encoding("missing nonce"))?;

        xchacha20::decrypt_xchacha20_poly1305(
            &nonce,
            &self.enc_key,
            ciphertext,
            associated_data,
        )
    }
}

impl std::fmt::Debug for PreferenceKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceKeys").finish()
    }
}
