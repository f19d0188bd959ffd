//! Conversion of field values to and from their stored string form.

use std::{fmt::Display, str::FromStr};

use serde::{de::DeserializeOwned, Serialize};

use crate::CodecError;

/// Converts values of `T` to and from the strings kept by the backend.
///
/// `deserialize` must be a left-inverse of `serialize` for every value ever stored.
pub trait FieldCodec<T>: Send + Sync {
    /// Turns `value` into its stored form.
    fn serialize(&self, value: &T) -> Result<String, CodecError>;
    /// Parses a stored string. Malformed input is an error, never a default.
    fn deserialize(&self, raw: &str) -> Result<T, CodecError>;
}

/// Codec for types with a canonical text form: `String`, `bool`, `i32`, `i64`, `f32`, ...
///
/// Booleans only accept `true` and `false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCodec;

impl<T> FieldCodec<T> for PlainCodec
where
    T: FromStr + Display,
    T::Err: Display,
{
    fn serialize(&self, value: &T) -> Result<String, CodecError> {
        Ok(value.to_string())
    }

    fn deserialize(&self, raw: &str) -> Result<T, CodecError> {
        raw.parse().map_err(|e: T::Err| CodecError::Deserialization {
            raw: raw.to_owned(),
            target: std::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }
}

/// Codec storing any serde type as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl<T> FieldCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError::Serialization {
            target: std::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, raw: &str) -> Result<T, CodecError> {
        serde_json::from_str(raw).map_err(|e| CodecError::Deserialization {
            raw: raw.to_owned(),
            target: std::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn test_plain_codec_bool_is_strict() {
        assert_eq!(FieldCodec::<bool>::deserialize(&PlainCodec, "true"), Ok(true));
        assert_eq!(FieldCodec::<bool>::serialize(&PlainCodec, &false).unwrap(), "false");

        let err = FieldCodec::<bool>::deserialize(&PlainCodec, "yes").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Deserialization { ref raw, target: "bool", .. } if raw == "yes"
        ));
    }

    #[test]
    fn test_plain_codec_numbers() {
        assert_eq!(FieldCodec::<i32>::deserialize(&PlainCodec, "-12"), Ok(-12));
        assert_eq!(
            FieldCodec::<i64>::deserialize(&PlainCodec, "9000000000"),
            Ok(9_000_000_000)
        );
        assert_eq!(FieldCodec::<f32>::deserialize(&PlainCodec, "1.5"), Ok(1.5));
        assert!(FieldCodec::<i32>::deserialize(&PlainCodec, "1.5").is_err());
        assert!(FieldCodec::<i32>::deserialize(&PlainCodec, "").is_err());
    }

    #[test]
    fn test_plain_codec_string_accepts_anything() {
        assert_eq!(
            FieldCodec::<String>::deserialize(&PlainCodec, ""),
            Ok(String::new())
        );
        assert_eq!(
            FieldCodec::<String>::serialize(&PlainCodec, &"a b".to_string()).unwrap(),
            "a b"
        );
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Proxy {
        host: String,
        port: u16,
    }

    #[test]
    fn test_json_codec() {
        let proxy = Proxy {
            host: "localhost".to_string(),
            port: 8080,
        };
        let raw = JsonCodec.serialize(&proxy).unwrap();
        assert_eq!(raw, r#"{"host":"localhost","port":8080}"#);

        let err = FieldCodec::<Proxy>::deserialize(&JsonCodec, "{").unwrap_err();
        assert!(matches!(err, CodecError::Deserialization { ref raw, .. } if raw == "{"));
    }
}
