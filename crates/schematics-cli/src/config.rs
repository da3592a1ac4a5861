//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments, which override file values

use crate::cli::EngineArgs;
use crate::error::{Error, Result};
use schematics_core::report::DEFAULT_TEMPLATE;
use schematics_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings: separator, id key, locale, parallel rows
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Template for rendered error messages
    pub template: String,

    /// Join rendered messages into one line with this separator
    pub join: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            template: DEFAULT_TEMPLATE.to_string(),
            join: None,
        }
    }
}

impl Config {
    /// Load configuration from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML, JSON or TOML".to_string(),
                })
            }
        };

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to load config, trying next location"
                        );
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".schematics.yaml"),
            PathBuf::from(".schematics.yml"),
            PathBuf::from(".schematics.json"),
            PathBuf::from(".schematics.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let schematics_dir = config_dir.join("schematics");
            paths.push(schematics_dir.join("config.yaml"));
            paths.push(schematics_dir.join("config.json"));
            paths.push(schematics_dir.join("config.toml"));
        }

        paths
    }

    /// Engine configuration with command-line overrides applied
    pub fn engine_config(&self, args: &EngineArgs) -> EngineConfig {
        let mut engine = self.engine.clone();
        if let Some(separator) = &args.separator {
            engine.separator = separator.clone();
        }
        if let Some(id_key) = &args.id_key {
            engine.id_key = Some(id_key.clone());
        }
        if let Some(locale) = &args.locale {
            engine.locale = locale.clone();
        }
        engine
    }

    /// Separator for the flatten and deflate commands
    pub fn separator(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .unwrap_or_else(|| self.engine.separator.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.output.template, DEFAULT_TEMPLATE);
        assert!(config.output.join.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_each_format() {
        let dir = tempdir().unwrap();

        let yaml = dir.path().join("config.yaml");
        fs::write(
            &yaml,
            "engine:\n  separator: /\n  id_key: id\noutput:\n  join: \"; \"\n",
        )
        .unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert_eq!(config.engine.separator, "/");
        assert_eq!(config.engine.id_key.as_deref(), Some("id"));
        assert_eq!(config.engine.locale, "en");
        assert_eq!(config.output.join.as_deref(), Some("; "));

        let toml_path = dir.path().join("config.toml");
        fs::write(
            &toml_path,
            "[engine]\nlocale = \"fr\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let config = Config::from_file(&toml_path).unwrap();
        assert_eq!(config.engine.locale, "fr");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));

        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"output": {"template": "%target"}}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert_eq!(config.output.template, "%target");
        assert!(config.output.color);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::from_file(&dir.path().join("missing.yaml")),
            Err(Error::FileNotFound { .. })
        ));

        let ini = dir.path().join("config.ini");
        fs::write(&ini, "[engine]").unwrap();
        assert!(matches!(Config::from_file(&ini), Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_flags_override_file_values() {
        let config = Config {
            engine: EngineConfig::default().with_separator("/").with_locale("de"),
            ..Config::default()
        };
        let args = EngineArgs {
            locale: Some("fr".to_string()),
            id_key: Some("uid".to_string()),
            ..EngineArgs::default()
        };

        let engine = config.engine_config(&args);
        assert_eq!(engine.separator, "/");
        assert_eq!(engine.locale, "fr");
        assert_eq!(engine.id_key.as_deref(), Some("uid"));

        assert_eq!(config.separator(None), "/");
        assert_eq!(config.separator(Some("::")), "::");
    }
}
