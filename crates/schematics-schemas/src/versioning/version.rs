//! Schema DSL version tags
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Field carrying the version tag in a schema document
pub const VERSION_KEY: &str = "version";

/// Schema DSL revisions understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Fields keyed by target pattern, functions keyed by name
    V0,
    /// Field list, functions keyed by name
    V1,
    /// Field list, functions as component lists
    V2,
    /// Field list, functions as name lists with a shared `constants` table
    Legacy,
}

/// Version tag parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("schema has no version tag")]
    Missing,

    #[error("version tag must be a string or a number")]
    InvalidType,

    #[error("unsupported schema version '{0}'")]
    Unsupported(String),
}

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 4] = [
        SchemaVersion::V0,
        SchemaVersion::V1,
        SchemaVersion::V2,
        SchemaVersion::Legacy,
    ];

    /// Parse a version tag
    ///
    /// Accepts an optional `v` prefix and ignores minor and patch parts, so
    /// `"1"`, `"v1"`, `"1.0"` and `"1.2.3"` all select [`SchemaVersion::V1`].
    pub fn parse(tag: &str) -> Result<Self, VersionError> {
        let trimmed = tag.trim();
        if trimmed.eq_ignore_ascii_case("legacy") {
            return Ok(SchemaVersion::Legacy);
        }

        let unprefixed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let major = unprefixed.split('.').next().unwrap_or_default();

        match major.parse::<u32>() {
            Ok(0) => Ok(SchemaVersion::V0),
            Ok(1) => Ok(SchemaVersion::V1),
            Ok(2) => Ok(SchemaVersion::V2),
            _ => Err(VersionError::Unsupported(tag.to_string())),
        }
    }

    /// Read the version tag of a raw schema document
    pub fn detect(raw: &Value) -> Result<Self, VersionError> {
        match raw.get(VERSION_KEY) {
            None | Some(Value::Null) => Err(VersionError::Missing),
            Some(Value::String(tag)) => Self::parse(tag),
            Some(Value::Number(number)) => Self::parse(&number.to_string()),
            Some(_) => Err(VersionError::InvalidType),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V0 => "v0",
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
            SchemaVersion::Legacy => "legacy",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
