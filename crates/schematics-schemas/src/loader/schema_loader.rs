//! Schema loader: parse, detect the version, decode
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use crate::decode::{decode, VALUE_PATH};
use crate::loader::{
    error::{LoaderError, LoaderResult},
    parser::{Format, SchemaParser},
};
use crate::versioning::{SchemaVersion, VersionError};
use schematics_core::SchemaDocument;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for schema loader behavior
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Version used instead of the document's own tag
    pub version: Option<SchemaVersion>,
}

/// Loads schema documents from files, strings or in-memory values
#[derive(Debug, Default)]
pub struct SchemaLoader {
    config: LoaderConfig,
    parser: SchemaParser,
}

impl SchemaLoader {
    /// Create a loader that reads each document's version tag
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            parser: SchemaParser::new(),
        }
    }

    /// Decode every document as `version`, whatever its tag says
    pub fn with_version(version: SchemaVersion) -> Self {
        Self::with_config(LoaderConfig { version: Some(version) })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a schema file, detecting JSON or YAML from its extension
    pub fn load_file(&self, path: &Path) -> LoaderResult<SchemaDocument> {
        let raw = self.parser.parse_file(path)?;
        let schema = self.decode_at(&raw, path)?;
        info!(
            path = %path.display(),
            version = %schema.version,
            fields = schema.fields.len(),
            "loaded schema"
        );
        Ok(schema)
    }

    /// Load a schema from text in a known format
    pub fn load_str(&self, content: &str, format: Format) -> LoaderResult<SchemaDocument> {
        let path = Path::new(VALUE_PATH);
        let raw = self.parser.parse_content(content, format, path)?;
        self.decode_at(&raw, path)
    }

    /// Load a schema from an already parsed value
    pub fn load_value(&self, raw: &Value) -> LoaderResult<SchemaDocument> {
        self.decode_at(raw, Path::new(VALUE_PATH))
    }

    /// The version a raw document will be decoded as
    pub fn resolve_version(&self, raw: &Value, path: &Path) -> LoaderResult<SchemaVersion> {
        if let Some(version) = self.config.version {
            return Ok(version);
        }
        SchemaVersion::detect(raw).map_err(|e| {
            let tag = match &e {
                VersionError::Unsupported(tag) => tag.clone(),
                VersionError::Missing | VersionError::InvalidType => String::new(),
            };
            LoaderError::version_error(tag, path.to_path_buf(), e.to_string())
        })
    }

    fn decode_at(&self, raw: &Value, path: &Path) -> LoaderResult<SchemaDocument> {
        let version = self.resolve_version(raw, path)?;
        debug!(path = %path.display(), version = %version, "decoding schema");
        decode(version, raw).map_err(|e| e.at(PathBuf::from(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_value_detects_version() {
        let loader = SchemaLoader::new();
        let raw = json!({"version": "v2", "fields": [{"target_key": "a", "required": true}]});
        let schema = loader.load_value(&raw).unwrap();
        assert_eq!(schema.version, "v2");
        assert!(schema.fields[0].required);
    }

    #[test]
    fn test_missing_version() {
        let raw = json!({"fields": []});

        let err = SchemaLoader::new().load_value(&raw).unwrap_err();
        assert!(matches!(err, LoaderError::VersionError { .. }));
        assert!(err.to_string().contains("no version tag"));

        let schema = SchemaLoader::with_version(SchemaVersion::V1).load_value(&raw).unwrap();
        assert_eq!(schema.version, "v1");
    }

    #[test]
    fn test_configured_version_wins_over_tag() {
        let raw = json!({"version": "1", "fields": {"a": {"is_required": true}}});
        assert!(SchemaLoader::new().load_value(&raw).is_err());

        let schema = SchemaLoader::with_version(SchemaVersion::V0).load_value(&raw).unwrap();
        assert_eq!(schema.fields[0].target_key, "a");
    }

    #[test]
    fn test_unsupported_version_keeps_tag() {
        let err = SchemaLoader::new().load_value(&json!({"version": "7"})).unwrap_err();
        match err {
            LoaderError::VersionError { version, .. } => assert_eq!(version, "7"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_str() {
        let yaml = "version: legacy\nfields:\n  - target_key: id\n    validators: [Exist]\n";
        let schema = SchemaLoader::new().load_str(yaml, Format::Yaml).unwrap();
        assert!(schema.fields[0].required);
        assert!(schema.fields[0].validators.is_empty());
    }
}
