//! Engine configuration
//!
//! The knobs consumed by the validation and transform engines. A single
//! `EngineConfig` is passed to each engine constructor; there is no
//! process-wide state.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default path segment separator
pub const DEFAULT_SEPARATOR: &str = ".";

/// Default locale for rendered messages
pub const DEFAULT_LOCALE: &str = "en";

/// Configuration shared by the validation and transform engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Separator joining path segments in flat keys
    pub separator: String,
    /// Flat key holding the identity of each row in a collection
    pub id_key: Option<String>,
    /// Locale messages are recorded under
    pub locale: String,
    /// Validate collection rows in parallel (requires the `parallel` feature)
    pub parallel_rows: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            id_key: None,
            locale: DEFAULT_LOCALE.to_string(),
            parallel_rows: false,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the flat key used as row identity
    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = Some(id_key.into());
        self
    }

    /// Set the active locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Enable parallel row validation
    pub fn with_parallel_rows(mut self, enabled: bool) -> Self {
        self.parallel_rows = enabled;
        self
    }

    /// Check the configuration before an engine is built
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(Error::configuration("separator must not be empty"));
        }
        if self.locale.trim().is_empty() {
            return Err(Error::configuration("locale must not be empty"));
        }
        if let Some(id_key) = &self.id_key {
            if id_key.is_empty() {
                return Err(Error::configuration("id_key must not be empty when set"));
            }
        }
        if self.parallel_rows && !cfg!(feature = "parallel") {
            tracing::warn!(
                "parallel_rows requested but the 'parallel' feature is disabled; \
                 rows run sequentially"
            );
        }
        Ok(())
    }
}
