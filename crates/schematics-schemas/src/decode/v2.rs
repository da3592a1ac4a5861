//! Version 2: field list, functions as ordered component lists
//!
//! This is the revision closest to the canonical model; a component may
//! appear more than once in a chain.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::{build_rule, non_empty, parse_document, with_dependencies, with_l10n, Metadata};
use crate::loader::LoaderResult;
use crate::versioning::SchemaVersion;
use schematics_core::registry::Attributes;
use schematics_core::schema::{FieldRule, FieldRuleBuilder, Localized, OperatorSpec, ValidatorSpec};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    fields: Vec<Field>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Field {
    target_key: String,
    required: bool,
    depends_on: Vec<String>,
    validators: Vec<Component>,
    operators: Vec<Component>,
    l10n: Localized,
    #[serde(flatten)]
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
struct Component {
    name: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    l10n: Localized,
}

pub(super) fn decode_fields(raw: &Value) -> LoaderResult<Vec<FieldRule>> {
    let document: Document = parse_document(SchemaVersion::V2, raw)?;

    let mut rules = Vec::with_capacity(document.fields.len());
    for field in document.fields {
        let mut builder = FieldRuleBuilder::new(field.target_key);
        if field.required {
            builder = builder.required();
        }
        builder = with_dependencies(builder, field.depends_on);

        for component in field.validators {
            let mut spec = ValidatorSpec::new(component.name).with_attributes(component.attributes);
            if let Some(error) = non_empty(component.error) {
                spec = spec.with_error(error);
            }
            spec.l10n = component.l10n;
            builder = builder.validator_spec(spec);
        }
        for component in field.operators {
            let spec = OperatorSpec::new(component.name).with_attributes(component.attributes);
            builder = builder.operator_spec(spec);
        }

        builder = with_l10n(builder, field.l10n);
        rules.push(build_rule(field.metadata.apply(builder))?);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoaderError;
    use serde_json::json;

    #[test]
    fn test_decode_component_lists() {
        let raw = json!({
            "version": "2.0",
            "fields": [{
                "target_key": "score",
                "validators": [
                    {"name": "IsNumber"},
                    {
                        "name": "InBetween",
                        "attributes": {"min": 0, "max": 10},
                        "error": "",
                        "l10n": {"en": "0 to 10"}
                    }
                ],
                "operators": [
                    {"name": "Add", "attributes": {"add_with": 3}},
                    {"name": "Multiply", "attributes": {"multiply_with": 2}},
                    {"name": "Add", "attributes": {"add_with": 1}}
                ]
            }]
        });

        let rules = decode_fields(&raw).unwrap();
        let rule = &rules[0];
        assert_eq!(rule.validators.len(), 2);
        assert_eq!(rule.validators[1].error, None);
        assert_eq!(rule.validators[1].l10n["en"], "0 to 10");
        assert_eq!(rule.operators.len(), 3);
        assert_eq!(rule.operators[2].attributes["add_with"], json!(1));
    }

    #[test]
    fn test_component_without_name() {
        let raw = json!({"fields": [{"target_key": "a", "validators": [{"attributes": {}}]}]});
        let err = decode_fields(&raw).unwrap_err();
        assert!(matches!(err, LoaderError::DecodeError { .. }));
        assert!(err.to_string().contains("name"));
    }
}
