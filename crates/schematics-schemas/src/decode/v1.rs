//! Version 1: field list, functions keyed by name
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::{
    build_rule, parse_document, with_dependencies, with_keyed_operators, with_keyed_validators,
    with_l10n, KeyedComponent, Metadata,
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
    fields: Vec<Field>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Field {
    target_key: String,
    required: bool,
    depends_on: Vec<String>,
    validators: IndexMap<String, KeyedComponent>,
    operators: IndexMap<String, KeyedComponent>,
    l10n: Localized,
    #[serde(flatten)]
    metadata: Metadata,
}

pub(super) fn decode_fields(raw: &Value) -> LoaderResult<Vec<FieldRule>> {
    let document: Document = parse_document(SchemaVersion::V1, raw)?;

    let mut rules = Vec::with_capacity(document.fields.len());
    for field in document.fields {
        let mut builder = FieldRuleBuilder::new(field.target_key);
        if field.required {
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
