//! Version 0: fields keyed by target pattern
//!
//! ```yaml
//! version: "0"
//! fields:
//!   user.email:
//!     is_required: true
//!     validators:
//!       IsEmail: { error: "email is invalid" }
//!     operators:
//!       LowerCase: {}
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::{
    build_rule, non_empty, parse_document, with_dependencies, with_keyed_operators,
    with_keyed_validators, with_l10n, KeyedComponent, Metadata,
};
use crate::loader::LoaderResult;
use crate::versioning::SchemaVersion;
use indexmap::IndexMap;
use schematics_core::schema::{FieldRule, FieldRuleBuilder, Localized};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    fields: IndexMap<String, Field>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Field {
    is_required: bool,
    /// Overrides the map key when set
    target_key: Option<String>,
    depends_on: Vec<String>,
    validators: IndexMap<String, KeyedComponent>,
    operators: IndexMap<String, KeyedComponent>,
    l10n: Localized,
    #[serde(flatten)]
    metadata: Metadata,
}

pub(super) fn decode_fields(raw: &Value) -> LoaderResult<Vec<FieldRule>> {
    let document: Document = parse_document(SchemaVersion::V0, raw)?;

    let mut rules = Vec::with_capacity(document.fields.len());
    for (key, field) in document.fields {
        let target = non_empty(field.target_key).unwrap_or(key);
        let mut builder = FieldRuleBuilder::new(target);
        if field.is_required {
            builder = builder.required();
        }
        builder = with_dependencies(builder, field.depends_on);
        builder = with_keyed_validators(builder, field.validators);
        builder = with_keyed_operators(builder, field.operators);
        builder = with_l10n(builder, field.l10n);
        rules.push(build_rule(field.metadata.apply(builder))?);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_keyed_fields() {
        let raw = json!({
            "version": "0",
            "fields": {
                "user.email": {
                    "is_required": true,
                    "name": "email",
                    "validators": {
                        "IsString": {},
                        "IsEmail": {
                            "error": "email is invalid",
                            "l10n": {"fr": "courriel invalide"}
                        }
                    },
                    "operators": {"LowerCase": {}}
                },
                "orders.*.price": {
                    "depends_on": ["orders.*.sku"],
                    "validators": {"MinAllowed": {"attributes": {"min": 0}}}
                }
            }
        });

        let rules = decode_fields(&raw).unwrap();
        assert_eq!(rules.len(), 2);

        let email = &rules[0];
        assert_eq!(email.target_key, "user.email");
        assert!(email.required);
        assert_eq!(email.name.as_deref(), Some("email"));
        let names: Vec<&str> = email.validators.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["IsString", "IsEmail"]);
        assert_eq!(email.validators[1].error.as_deref(), Some("email is invalid"));
        assert_eq!(email.validators[1].l10n["fr"], "courriel invalide");
        assert_eq!(email.operators[0].name, "LowerCase");

        let price = &rules[1];
        assert!(!price.required);
        assert_eq!(price.depends_on, vec!["orders.*.sku"]);
        assert_eq!(price.validators[0].attributes["min"], json!(0));
    }

    #[test]
    fn test_target_key_overrides_map_key() {
        let raw = json!({
            "fields": {
                "alias": {"target_key": "profile.name"},
                "plain": {"target_key": ""}
            }
        });
        let rules = decode_fields(&raw).unwrap();
        assert_eq!(rules[0].target_key, "profile.name");
        assert_eq!(rules[1].target_key, "plain");
    }

    #[test]
    fn test_presence_marker_validator() {
        let raw = json!({"fields": {"id": {"validators": {"Required": {}, "IsString": {}}}}});
        let rules = decode_fields(&raw).unwrap();
        assert!(rules[0].required);
        assert_eq!(rules[0].validators.len(), 1);
    }

    #[test]
    fn test_fields_must_be_a_map() {
        assert!(decode_fields(&json!({"fields": [{"target_key": "a"}]})).is_err());
    }
}
