//! Schema parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for schema parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            },
            None => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Parses schema and data documents into JSON values
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // Parse as YAML first so YAML-specific errors keep their location
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse content whose format is unknown, trying the extension first,
    /// then JSON, then YAML
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(format) = Format::from_path(path) {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }

    /// Serialize a value back to string format
    pub fn serialize(&self, value: &Value, format: Format, path: &Path) -> LoaderResult<String> {
        match format {
            Format::Json => serde_json::to_string_pretty(value)
                .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e)),
            Format::Yaml => serde_yaml::to_string(value)
                .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("schema.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("schema.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("schema.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("schema.txt")).is_err());
        assert!(Format::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn test_yaml_parsing() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.yaml");

        let yaml_content = r#"
version: "2"
fields:
  - target_key: user.email
    required: true
    validators:
      - name: IsEmail
"#;
        fs::write(&file_path, yaml_content)?;

        let result = SchemaParser::new().parse_file(&file_path)?;
        assert_eq!(result["version"], "2");
        assert_eq!(result["fields"][0]["target_key"], "user.email");
        assert_eq!(result["fields"][0]["required"], true);
        Ok(())
    }

    #[test]
    fn test_json_parsing_keeps_key_order() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.json");
        fs::write(&file_path, r#"{"zeta": 1, "alpha": 2, "mid": 3}"#)?;

        let result = SchemaParser::new().parse_file(&file_path)?;
        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        Ok(())
    }

    #[test]
    fn test_malformed_input() {
        let parser = SchemaParser::new();
        let err = parser.parse_json("{", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));

        let err = parser.parse_yaml("a: [", Path::new("broken.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::YamlParseError { .. }));
    }

    #[test]
    fn test_fallback_parsing() -> LoaderResult<()> {
        let parser = SchemaParser::new();

        let stdin = Path::new("stdin");
        let (value, format) = parser.parse_with_fallback(r#"{"version": "1"}"#, stdin)?;
        assert_eq!(format, Format::Json);
        assert_eq!(value["version"], "1");

        let (value, format) = parser.parse_with_fallback("version: '1'\nfields: []", stdin)?;
        assert_eq!(format, Format::Yaml);
        assert_eq!(value["version"], "1");
        Ok(())
    }

    #[test]
    fn test_serialize() -> LoaderResult<()> {
        let parser = SchemaParser::new();
        let value = serde_json::json!({"a": {"b": [1, 2]}});

        let json = parser.serialize(&value, Format::Json, Path::new("out.json"))?;
        assert_eq!(parser.parse_json(&json, Path::new("out.json"))?, value);

        let yaml = parser.serialize(&value, Format::Yaml, Path::new("out.yaml"))?;
        assert_eq!(parser.parse_yaml(&yaml, Path::new("out.yaml"))?, value);
        Ok(())
    }
}
