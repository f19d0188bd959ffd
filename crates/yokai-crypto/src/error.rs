use thiserror::Error;

/// Errors produced while deriving keys or sealing and opening values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The supplied key material has the wrong length.
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },

    /// HKDF could not expand the master key.
    #[error("Key derivation failed")]
    KeyDerivation,

    /// The sealed value could not be authenticated with the given key and associated data.
    #[error("Failed to decrypt value")]
    Decrypt,

    /// Encryption failed.
    #[error("Failed to encrypt value")]
    Encrypt,

    /// The sealed value is not valid base64 or is too short to contain a nonce.
    #[error("Malformed sealed value: {0}")]
    Encoding(&'static str),
}

pub(crate) type Result<T, E = CryptoError> = std::result::Result<T, E>;
