//! Error types for schema loading operations
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading, parsing or decoding a schema document
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Missing, malformed or unsupported version tag
    #[error("Invalid schema version '{version}' in '{path}': {reason}")]
    VersionError {
        version: String,
        path: PathBuf,
        reason: String,
    },

    /// The document does not have the shape its version requires
    #[error("Failed to decode {version} schema '{path}': {reason}")]
    DecodeError {
        version: String,
        path: PathBuf,
        reason: String,
    },

    /// A decoded field rule was rejected by the core model
    #[error("Invalid field rule in '{path}': {source}")]
    RuleError {
        path: PathBuf,
        source: schematics_core::Error,
    },
}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::from("<unknown>"),
            source: error,
        }
    }
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError { path, source: error }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError { path, source: error }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError { path, source: error }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a version error
    pub fn version_error(
        version: impl Into<String>,
        path: PathBuf,
        reason: impl Into<String>,
    ) -> Self {
        Self::VersionError {
            version: version.into(),
            path,
            reason: reason.into(),
        }
    }

    /// Create a decode error
    pub fn decode_error(
        version: impl Into<String>,
        path: PathBuf,
        reason: impl Into<String>,
    ) -> Self {
        Self::DecodeError {
            version: version.into(),
            path,
            reason: reason.into(),
        }
    }

    pub fn rule_error(path: PathBuf, error: schematics_core::Error) -> Self {
        Self::RuleError { path, source: error }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::VersionError { path, .. }
            | Self::DecodeError { path, .. }
            | Self::RuleError { path, .. } => path,
        }
    }

    /// Attach a path to an error raised without one
    pub fn at(mut self, new_path: PathBuf) -> Self {
        match &mut self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::VersionError { path, .. }
            | Self::DecodeError { path, .. }
            | Self::RuleError { path, .. } => *path = new_path,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("schema.yaml");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), &path);

        let version_err = LoaderError::version_error("9", path.clone(), "unsupported");
        assert_eq!(
            version_err.to_string(),
            "Invalid schema version '9' in 'schema.yaml': unsupported"
        );
    }

    #[test]
    fn test_at_replaces_path() {
        let err = LoaderError::decode_error("v1", PathBuf::from("<value>"), "fields must be a list")
            .at(PathBuf::from("rules.json"));
        assert_eq!(err.path(), &PathBuf::from("rules.json"));
        assert!(err.to_string().contains("rules.json"));
    }
}
