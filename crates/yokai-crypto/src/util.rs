use std::pin::Pin;

use generic_array::{ArrayLength, GenericArray};

use crate::{CryptoError, Result};

/// [RFC5869](https://datatracker.ietf.org/doc/html/rfc5869) HKDF-Expand operation
pub(crate) fn hkdf_expand<T: ArrayLength<u8>>(
    prk: &[u8],
    info: &str,
) -> Result<Pin<Box<GenericArray<u8, T>>>> {
    let hkdf =
        hkdf::Hkdf::<sha2::Sha256>::from_prk(prk).map_err(|_| CryptoError::KeyDerivation)?;
    let mut key = Box::<GenericArray<u8, T>>::default();

    hkdf.expand(info.as_bytes(), &mut key)
        .map_err(|_| CryptoError::KeyDerivation)?;

    Ok(Box::into_pin(key))
}

#[cfg(test)]
mod tests {
    use generic_array::typenum::U32;

    use super::*;

    #[test]
    fn test_hkdf_expand_is_deterministic() {
        let prk = [7u8; 32];

        let first = hkdf_expand::<U32>(&prk, "info").unwrap();
        let second = hkdf_expand::<U32>(&prk, "info").unwrap();
        let other = hkdf_expand::<U32>(&prk, "other").unwrap();

        assert_eq!(first.as_slice(), second.as_slice());
        assert_ne!(first.as_slice(), other.as_slice());
    }

    #[test]
    fn test_hkdf_expand_rejects_short_prk() {
        let result = hkdf_expand::<U32>(&[1u8; 4], "info");
        assert_eq!(result.unwrap_err(), CryptoError::KeyDerivation);
    }
}
