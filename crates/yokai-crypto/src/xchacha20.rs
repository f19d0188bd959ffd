//! # XChaCha20Poly1305 operations
//!
//! Low level XChaCha20Poly1305 operations used by [`PreferenceKeys`](crate::PreferenceKeys).
//!
//! XChaCha20Poly1305 encrypts data and authenticates both the cipher text and associated data. It
//! does not provide key-commitment, so every preference store gets its own derived key.

use chacha20poly1305::{AeadCore, AeadInPlace, KeyInit, XChaCha20Poly1305};
use generic_array::{
    typenum::{U24, U32},
    GenericArray,
};

use crate::{CryptoError, Result};

pub(crate) const NONCE_SIZE: usize = 24;

pub(crate) fn generate_nonce() -> GenericArray<u8, U24> {
    XChaCha20Poly1305::generate_nonce(rand::thread_rng())
}

pub(crate) fn encrypt_xchacha20_poly1305(
    nonce: &[u8; NONCE_SIZE],
    key: &GenericArray<u8, U32>,
    plaintext_secret_data: &[u8],
    associated_data: &[u8],
) -> Result<Vec<u8>> {
    // This buffer contains the plaintext, that will be encrypted in-place
    let mut buffer = Vec::from(plaintext_secret_data);
    XChaCha20Poly1305::new(key)
        .encrypt_in_place(
            GenericArray::from_slice(nonce),
            associated_data,
            &mut buffer,
        )
        .map_err(|_| CryptoError::Encrypt)?;
    Ok(buffer)
}

pub(crate) fn decrypt_xchacha20_poly1305(
    nonce: &[u8; NONCE_SIZE],
    key: &GenericArray<u8, U32>,
    ciphertext: &[u8],
    associated_data: &[u8],
) -> Result<Vec<u8>> {
    let mut buffer = ciphertext.to_vec();
    XChaCha20Poly1305::new(key)
        .decrypt_in_place(
            GenericArray::from_slice(nonce),
            associated_data,
            &mut buffer,
        )
        .map_err(|_| CryptoError::Decrypt)?;
    Ok(buffer)
}
