//! Error types for the Schematics core library
//!
//! This module defines the fatal error taxonomy of the engine. Data-quality
//! problems (a required field is missing, a validator rejected a value) are
//! never reported through this type; they are collected as records in a
//! [`crate::report::ErrorCollection`]. An [`Error`] aborts the current call only.

use std::fmt;
use thiserror::Error;

/// Main error type for Schematics operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input is neither an object nor a collection of objects
    #[error("Invalid data shape: expected an object or an array of objects, found {found}")]
    InvalidShape { found: String },

    /// A target key pattern could not be compiled
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A prefix has both numeric and non-numeric children during deflate
    #[error("Ambiguous container at '{prefix}': children mix array indices and object keys")]
    AmbiguousContainer { prefix: String },

    /// A flat key is both a leaf value and the prefix of another key
    #[error("Path conflict at '{path}': a value and a nested container share this path")]
    PathConflict { path: String },

    /// An array index segment is too large to rebuild
    #[error("Index out of range at '{path}': {index}")]
    IndexOutOfRange { path: String, index: String },

    /// A schema references a validator that is not registered
    #[error("Validator '{name}' is not registered (referenced by '{target}')")]
    UnknownValidator { name: String, target: String },

    /// A schema references an operator that is not registered
    #[error("Operator '{name}' is not registered (referenced by '{target}')")]
    UnknownOperator { name: String, target: String },

    /// An operator function failed while transforming a value
    #[error("Operator '{operator}' failed at '{target}': {message}")]
    Operator {
        operator: String,
        target: String,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by a validator or operator function
///
/// Validators return it to reject a value; the message becomes the record
/// text unless the schema overrides it. Operators return it when they
/// cannot produce a value at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FunctionError {
    pub message: String,
}

impl FunctionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Attribute missing or of the wrong type in the schema
    pub fn attribute(name: &str, expected: &str) -> Self {
        Self::new(format!(
            "attribute '{}' is missing or is not {}",
            name, expected
        ))
    }
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid shape error describing the offending value
    pub fn invalid_shape(value: &serde_json::Value) -> Self {
        Self::InvalidShape {
            found: ValueKind::of(value).to_string(),
        }
    }

    /// Whether this error comes from a schema referencing unknown functions
    pub fn is_registry_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownValidator { .. } | Self::UnknownOperator { .. }
        )
    }

    /// Whether this error comes from the shape of the input data
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidShape { .. }
                | Self::AmbiguousContainer { .. }
                | Self::PathConflict { .. }
                | Self::IndexOutOfRange { .. }
                | Self::InvalidPattern { .. }
        )
    }
}

/// Coarse JSON type, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Boolean,
            serde_json::Value::Number(_) => ValueKind::Number,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Array(_) => ValueKind::Array,
            serde_json::Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Array => write!(f, "array"),
            ValueKind::Object => write!(f, "object"),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownValidator {
            name: "IsFoo".to_string(),
            target: "user.name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Validator 'IsFoo' is not registered (referenced by 'user.name')"
        );
    }

    #[test]
    fn test_invalid_shape_names_kind() {
        let err = Error::invalid_shape(&json!("text"));
        assert!(err.to_string().contains("found string"));
        assert!(err.is_structural());
        assert!(!err.is_registry_error());
    }

    #[test]
    fn test_function_error_attribute() {
        let err = FunctionError::attribute("max", "a number");
        assert_eq!(err.to_string(), "attribute 'max' is missing or is not a number");
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(matches!(err, Error::Internal { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
