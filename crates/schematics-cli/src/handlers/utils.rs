//! Shared utilities for command handlers

use crate::cli::EngineArgs;
use crate::error::{Error, Result};
use schematics_schemas::{Format, SchemaDocument, SchemaLoader, SchemaParser, SchemaVersion};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Path argument meaning "read from stdin"
const STDIN_PATH: &str = "-";

/// Read a JSON or YAML document from a file, or from stdin for `-`
pub fn read_document(path: &Path) -> Result<Value> {
    let parser = SchemaParser::new();

    if path == Path::new(STDIN_PATH) {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        let (value, format) = parser.parse_with_fallback(&content, Path::new("<stdin>"))?;
        debug!(?format, bytes = content.len(), "read document from stdin");
        return Ok(value);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let value = match Format::from_path(path) {
        Ok(_) => parser.parse_file(path)?,
        Err(_) => {
            let content = fs::read_to_string(path)?;
            parser.parse_with_fallback(&content, path)?.0
        }
    };
    debug!(path = %path.display(), "read document");
    Ok(value)
}

/// Load and decode the schema named by the engine arguments
pub fn load_schema(args: &EngineArgs) -> Result<SchemaDocument> {
    if !args.schema.exists() {
        return Err(Error::FileNotFound {
            path: args.schema.clone(),
        });
    }

    let loader = match &args.schema_version {
        Some(tag) => {
            let version = SchemaVersion::parse(tag)
                .map_err(|e| Error::invalid_args(format!("--schema-version: {}", e)))?;
            SchemaLoader::with_version(version)
        }
        None => SchemaLoader::new(),
    };
    Ok(loader.load_file(&args.schema)?)
}

/// Write a document, choosing YAML or JSON by extension (JSON otherwise)
pub fn write_document(path: &Path, value: &Value) -> Result<()> {
    let format = Format::from_path(path).unwrap_or(Format::Json);
    let mut content = SchemaParser::new().serialize(value, format, path)?;
    if format == Format::Json {
        content.push('\n');
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), format = format.primary_extension(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_read_document_formats() {
        let dir = tempdir().unwrap();

        let json_path = dir.path().join("data.json");
        fs::write(&json_path, r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(read_document(&json_path).unwrap(), json!({"a": [1, 2]}));

        let yaml_path = dir.path().join("data.yml");
        fs::write(&yaml_path, "a:\n  - 1\n  - 2\n").unwrap();
        assert_eq!(read_document(&yaml_path).unwrap(), json!({"a": [1, 2]}));

        let untyped = dir.path().join("data.txt");
        fs::write(&untyped, "a: 1\n").unwrap();
        assert_eq!(read_document(&untyped).unwrap(), json!({"a": 1}));

        assert!(matches!(
            read_document(&dir.path().join("missing.json")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_write_document() {
        let dir = tempdir().unwrap();
        let value = json!({"user": {"name": "Ada"}});

        let nested = dir.path().join("out").join("result.yaml");
        write_document(&nested, &value).unwrap();
        assert_eq!(read_document(&nested).unwrap(), value);

        let plain = dir.path().join("result.out");
        write_document(&plain, &value).unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(&plain).unwrap()).unwrap();
        assert_eq!(written, value);
    }

    #[test]
    fn test_load_schema_version_flag() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        fs::write(
            &schema,
            r#"{"fields": [{"target_key": "a", "validators": [{"name": "IsString"}]}]}"#,
        )
        .unwrap();

        let mut args = EngineArgs {
            schema: schema.clone(),
            ..EngineArgs::default()
        };
        assert!(matches!(load_schema(&args), Err(Error::Loader(_))));

        args.schema_version = Some("2".to_string());
        assert_eq!(load_schema(&args).unwrap().fields[0].target_key, "a");

        args.schema_version = Some("nine".to_string());
        assert!(matches!(load_schema(&args), Err(Error::InvalidArgs(_))));

        args.schema = PathBuf::from("does-not-exist.yaml");
        assert!(matches!(load_schema(&args), Err(Error::FileNotFound { .. })));
    }
}
