//! Versioned schema decoding
//!
//! Each DSL revision has one adapter turning a raw document into the
//! canonical [`SchemaDocument`]. Adapters are pure: they never touch the
//! filesystem and never consult the registries, so a schema naming an
//! unknown function decodes fine and is rejected when an engine is built.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

mod legacy;
mod v0;
mod v1;
mod v2;

use crate::loader::{LoaderError, LoaderResult};
use crate::versioning::{SchemaVersion, VERSION_KEY};
use indexmap::IndexMap;
use schematics_core::registry::Attributes;
use schematics_core::schema::{FieldRule, FieldRuleBuilder, Localized, OperatorSpec, ValidatorSpec};
use schematics_core::SchemaDocument;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Placeholder path for documents that did not come from a file
pub const VALUE_PATH: &str = "<value>";

/// Decode a raw schema document written in `version`
///
/// The document's own version tag is kept as [`SchemaDocument::version`];
/// when it has none the canonical name of `version` is used.
pub fn decode(version: SchemaVersion, raw: &Value) -> LoaderResult<SchemaDocument> {
    if !raw.is_object() {
        return Err(LoaderError::decode_error(
            version.as_str(),
            value_path(),
            "schema must be an object",
        ));
    }

    let fields = match version {
        SchemaVersion::V0 => v0::decode_fields(raw)?,
        SchemaVersion::V1 => v1::decode_fields(raw)?,
        SchemaVersion::V2 => v2::decode_fields(raw)?,
        SchemaVersion::Legacy => legacy::decode_fields(raw)?,
    };

    let tag = match raw.get(VERSION_KEY) {
        Some(Value::String(tag)) => tag.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => version.as_str().to_string(),
    };

    debug!(version = %version, fields = fields.len(), "decoded schema");
    Ok(SchemaDocument { version: tag, fields })
}

fn value_path() -> PathBuf {
    PathBuf::from(VALUE_PATH)
}

/// Deserialize the revision-specific document shape
fn parse_document<T: DeserializeOwned>(version: SchemaVersion, raw: &Value) -> LoaderResult<T> {
    T::deserialize(raw)
        .map_err(|e| LoaderError::decode_error(version.as_str(), value_path(), e.to_string()))
}

fn build_rule(builder: FieldRuleBuilder) -> LoaderResult<FieldRule> {
    builder
        .build()
        .map_err(|e| LoaderError::rule_error(value_path(), e))
}

/// Function entry of the keyed-map revisions (v0, v1)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeyedComponent {
    attributes: Attributes,
    error: Option<String>,
    l10n: Localized,
}

/// Descriptive metadata shared by v0, v1 and v2 fields
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Metadata {
    name: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    additional_information: Option<Value>,
}

impl Metadata {
    fn apply(self, mut builder: FieldRuleBuilder) -> FieldRuleBuilder {
        if let Some(name) = non_empty(self.name) {
            builder = builder.name(name);
        }
        if let Some(display_name) = non_empty(self.display_name) {
            builder = builder.display_name(display_name);
        }
        if let Some(description) = non_empty(self.description) {
            builder = builder.description(description);
        }
        match self.additional_information {
            None | Some(Value::Null) => builder,
            Some(Value::String(text)) => builder.additional_information(text),
            Some(other) => builder.additional_information(other.to_string()),
        }
    }
}

fn with_keyed_validators(
    mut builder: FieldRuleBuilder,
    validators: IndexMap<String, KeyedComponent>,
) -> FieldRuleBuilder {
    for (name, component) in validators {
        let mut spec = ValidatorSpec::new(name).with_attributes(component.attributes);
        if let Some(error) = non_empty(component.error) {
            spec = spec.with_error(error);
        }
        spec.l10n = component.l10n;
        builder = builder.validator_spec(spec);
    }
    builder
}

fn with_keyed_operators(
    mut builder: FieldRuleBuilder,
    operators: IndexMap<String, KeyedComponent>,
) -> FieldRuleBuilder {
    for (name, component) in operators {
        builder =
            builder.operator_spec(OperatorSpec::new(name).with_attributes(component.attributes));
    }
    builder
}

fn with_dependencies(mut builder: FieldRuleBuilder, depends_on: Vec<String>) -> FieldRuleBuilder {
    for pattern in depends_on {
        builder = builder.depends_on(pattern);
    }
    builder
}

fn with_l10n(mut builder: FieldRuleBuilder, l10n: Localized) -> FieldRuleBuilder {
    for (locale, message) in l10n {
        builder = builder.l10n(locale, message);
    }
    builder
}

/// Empty strings in the DSL mean "not set"
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object() {
        for version in SchemaVersion::ALL {
            let err = decode(version, &json!([1, 2])).unwrap_err();
            assert!(matches!(err, LoaderError::DecodeError { .. }));
        }
    }

    #[test]
    fn test_missing_fields_is_empty_schema() {
        for version in SchemaVersion::ALL {
            let schema = decode(version, &json!({"version": "x"})).unwrap();
            assert!(schema.fields.is_empty());
            assert_eq!(schema.version, "x");
        }
    }

    #[test]
    fn test_version_falls_back_to_canonical_name() {
        let schema = decode(SchemaVersion::V2, &json!({"fields": []})).unwrap();
        assert_eq!(schema.version, "v2");

        let schema = decode(SchemaVersion::V1, &json!({"version": 1, "fields": []})).unwrap();
        assert_eq!(schema.version, "1");
    }

    #[test]
    fn test_metadata() {
        let builder = Metadata {
            name: Some("email".to_string()),
            display_name: Some(String::new()),
            description: Some("Primary contact".to_string()),
            additional_information: Some(json!({"source": "crm"})),
        }
        .apply(FieldRuleBuilder::new("user.email"));

        let rule = builder.build().unwrap();
        assert_eq!(rule.name.as_deref(), Some("email"));
        assert_eq!(rule.display_name, None);
        assert_eq!(rule.description.as_deref(), Some("Primary contact"));
        assert_eq!(rule.additional_information.as_deref(), Some(r#"{"source":"crm"}"#));
    }
}
