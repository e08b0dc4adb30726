//! Column-level error types.
//!
//! Reads and writes fail differently. A read that finds malformed or
//! wrongly-shaped text produces a [`DecodeError`]; `get()` logs it and returns
//! `None`, `try_get()` hands it back. A write of the wrong shape produces a
//! [`ShapeError`] and never touches storage. [`ColumnError`] is the umbrella
//! type used by model-level operations.

use jsoncol_core::CoreError;
use thiserror::Error;

/// Returns a short name for the kind of a JSON value, for error messages.
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// The raw text of a column could not be turned into the declared shape.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The stored text is not valid JSON.
    #[error("column '{column}' does not hold valid JSON: {source}")]
    Malformed {
        /// The backing column.
        column: String,
        /// The parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The stored JSON parsed but is not the declared shape.
    #[error("column '{column}' should hold {expected}, found {found}")]
    WrongShape {
        /// The backing column.
        column: String,
        /// The declared shape.
        expected: &'static str,
        /// The kind that was actually stored.
        found: &'static str,
    },
}

/// A value of the wrong shape was passed to a setter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("column '{column}' should be set to {expected}, got {found}")]
pub struct ShapeError {
    /// The backing column.
    pub column: String,
    /// The declared shape.
    pub expected: &'static str,
    /// The kind of the rejected value.
    pub found: &'static str,
}

/// Errors from model-level field access and descriptor construction.
#[derive(Error, Debug)]
pub enum ColumnError {
    /// A setter rejected its input.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Stored text could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// No descriptor is registered under this field name.
    #[error("model '{model}' has no field '{field}'")]
    UnknownField {
        /// The model name.
        model: String,
        /// The requested field.
        field: String,
    },

    /// A descriptor with this field name is already registered.
    #[error("model '{model}' already has a field '{field}'")]
    DuplicateField {
        /// The model name.
        model: String,
        /// The duplicated field.
        field: String,
    },

    /// Another descriptor already reads and writes this column.
    #[error("model '{model}' already maps column '{column}'")]
    DuplicateColumn {
        /// The model name.
        model: String,
        /// The shared column.
        column: String,
    },

    /// A storage type name did not match any known column type.
    #[error("unknown column type '{0}'")]
    UnknownColumnType(String),

    /// Settings or options are inconsistent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&serde_json::json!(null)), "null");
        assert_eq!(json_kind(&serde_json::json!(true)), "boolean");
        assert_eq!(json_kind(&serde_json::json!(1.5)), "number");
        assert_eq!(json_kind(&serde_json::json!("x")), "string");
        assert_eq!(json_kind(&serde_json::json!([])), "array");
        assert_eq!(json_kind(&serde_json::json!({})), "object");
    }

    #[test]
    fn test_shape_error_display() {
        let err = ShapeError {
            column: "tags".into(),
            expected: "array",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "column 'tags' should be set to array, got string"
        );
    }

    #[test]
    fn test_decode_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DecodeError::Malformed {
            column: "meta".into(),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("column 'meta' does not hold valid JSON"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_column_error_transparent() {
        let err: ColumnError = ShapeError {
            column: "tags".into(),
            expected: "array",
            found: "object",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "column 'tags' should be set to array, got object"
        );

        let err: ColumnError = CoreError::ImproperlyConfigured("bad default".into()).into();
        assert_eq!(err.to_string(), "Improperly configured: bad default");
    }
}
