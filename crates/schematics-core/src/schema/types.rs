//! Schema document, field rule and function spec types
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use crate::registry::Attributes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages keyed by locale
pub type Localized = IndexMap<String, String>;

/// An ordered set of field rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

impl SchemaDocument {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field rule
    pub fn with_field(mut self, field: FieldRule) -> Self {
        self.fields.push(field);
        self
    }

    /// Find the rule for a target key pattern
    pub fn field(&self, target_key: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.target_key == target_key)
    }

    /// Turn presence-marker validators into `required` on every field
    pub fn absorb_presence_markers(&mut self) {
        for field in &mut self.fields {
            field.absorb_presence_markers();
        }
    }
}

/// Validation and transformation rules for one target key pattern
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub target_key: String,

    #[serde(default)]
    pub required: bool,

    /// Patterns that must each match at least one key before this rule runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<ValidatorSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operators: Vec<OperatorSpec>,

    /// Message overrides applied to every validator of this field
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub l10n: Localized,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

impl FieldRule {
    pub fn new(target_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            ..Default::default()
        }
    }

    /// Remove presence-marker validators, marking the field required if any
    /// were present
    pub fn absorb_presence_markers(&mut self) {
        let before = self.validators.len();
        self.validators.retain(|v| !is_presence_marker(&v.name));
        if self.validators.len() != before {
            self.required = true;
        }
    }
}

/// One validator invocation within a field rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: Attributes,

    /// Replaces the function's own message for the active locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub l10n: Localized,
}

impl ValidatorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn with_l10n(mut self, locale: impl Into<String>, message: impl Into<String>) -> Self {
        self.l10n.insert(locale.into(), message.into());
        self
    }
}

/// One operator invocation within a field rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: Attributes,
}

impl OperatorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }
}

/// Whether a validator name only marks its field as required
///
/// Matches `Required`, `IsRequired`, `Exist` and `MustHave`, ignoring case
/// as well as `-` and `_`.
pub fn is_presence_marker(name: &str) -> bool {
    let normalized: String = name
        .chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect();
    matches!(normalized.as_str(), "required" | "isrequired" | "exist" | "musthave")
}
