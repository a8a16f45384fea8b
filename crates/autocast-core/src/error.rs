//! Error types for registration and casting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::type_key::TypeKey;

/// Stable, machine-readable error codes.
///
/// Variant names and their serialized `snake_case` strings are part of the
/// public contract and must not change across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// A conversion for the same ordered pair of types was already registered.
    DuplicateConversion,
    /// A conversion from a type to itself was registered.
    SelfConversion,
    /// No chain of registered conversions connects the two types.
    NoPathFound,
    /// A conversion produced a value of a different type than it declared.
    TypeMismatch,
    /// A fallible conversion function returned an error.
    ConversionFailed,
}

#[derive(Debug, Error)]
pub enum CastError {
    #[error("Duplicate conversion from {from} to {to}")]
    DuplicateConversion { from: TypeKey, to: TypeKey },

    #[error("Cannot register a conversion from {0} to itself")]
    SelfConversion(TypeKey),

    #[error("Couldn't find a cast path between {from} and {to}")]
    NoPathFound { from: TypeKey, to: TypeKey },

    #[error("Returned value is not of type {expected} (it's {actual})")]
    TypeMismatch { expected: TypeKey, actual: TypeKey },

    #[error("Conversion from {from} to {to} failed: {source}")]
    ConversionFailed {
        from: TypeKey,
        to: TypeKey,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CastError {
    /// Returns the stable error code for this error variant.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            CastError::DuplicateConversion { .. } => ErrorCode::DuplicateConversion,
            CastError::SelfConversion(_) => ErrorCode::SelfConversion,
            CastError::NoPathFound { .. } => ErrorCode::NoPathFound,
            CastError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            CastError::ConversionFailed { .. } => ErrorCode::ConversionFailed,
        }
    }

    /// The types involved, in `(from, to)` or `(expected, actual)` order.
    pub fn types(&self) -> Vec<TypeKey> {
        match self {
            CastError::DuplicateConversion { from, to }
            | CastError::NoPathFound { from, to }
            | CastError::ConversionFailed { from, to, .. } => vec![*from, *to],
            CastError::SelfConversion(key) => vec![*key],
            CastError::TypeMismatch { expected, actual } => vec![*expected, *actual],
        }
    }

    /// Structured JSON form: `{"code": "...", "message": "...", "types": [...]}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
            "types": self.types(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_code_serializes_snake_case() {
        let json = serde_json::to_value(ErrorCode::NoPathFound).unwrap();
        assert_eq!(json, json!("no_path_found"));

        let back: ErrorCode = serde_json::from_value(json!("type_mismatch")).unwrap();
        assert_eq!(back, ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_no_path_message() {
        let err = CastError::NoPathFound {
            from: TypeKey::of::<i64>(),
            to: TypeKey::of::<bool>(),
        };
        assert_eq!(
            err.to_string(),
            "Couldn't find a cast path between i64 and bool"
        );
        assert_eq!(err.error_code(), ErrorCode::NoPathFound);
    }

    #[test]
    fn test_to_json_lists_types() {
        let err = CastError::TypeMismatch {
            expected: TypeKey::of::<String>(),
            actual: TypeKey::of::<i64>(),
        };
        let json = err.to_json();
        assert_eq!(json["code"], json!("type_mismatch"));
        assert_eq!(json["types"], json!(["String", "i64"]));
        assert!(json["message"].as_str().unwrap().contains("it's i64"));
    }

    #[test]
    fn test_conversion_failed_keeps_source() {
        let source = "x".parse::<i64>().unwrap_err();
        let err = CastError::ConversionFailed {
            from: TypeKey::of::<String>(),
            to: TypeKey::of::<i64>(),
            source: Box::new(source),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Conversion from String to i64 failed"));
    }
}
