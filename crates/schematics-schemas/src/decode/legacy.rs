//! Legacy revision: name lists with a shared constants table
//!
//! Validator attributes live in `constants` under the validator's name and
//! operator attributes under the operator's name prefixed with `_`. A
//! constant's `err` replaces the validator's message. Presence markers in
//! the validator list make the field required.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::{build_rule, non_empty, parse_document, with_dependencies};
use crate::loader::LoaderResult;
use crate::versioning::SchemaVersion;
use indexmap::IndexMap;
use schematics_core::registry::Attributes;
use schematics_core::schema::{FieldRule, FieldRuleBuilder, OperatorSpec, ValidatorSpec};
use serde::Deserialize;
use serde_json::Value;

/// Prefix marking operator entries in `constants`
const OPERATOR_PREFIX: &str = "_";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    fields: Vec<Field>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Field {
    target_key: String,
    depends_on: Vec<String>,
    description: Option<String>,
    validators: Vec<String>,
    operators: Vec<String>,
    constants: IndexMap<String, Constant>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Constant {
    attributes: Attributes,
    err: Option<String>,
}

pub(super) fn decode_fields(raw: &Value) -> LoaderResult<Vec<FieldRule>> {
    let document: Document = parse_document(SchemaVersion::Legacy, raw)?;

    let mut rules = Vec::with_capacity(document.fields.len());
    for field in document.fields {
        let mut builder = FieldRuleBuilder::new(field.target_key);
        builder = with_dependencies(builder, field.depends_on);

        for name in field.validators {
            let mut spec = ValidatorSpec::new(name.as_str());
            if let Some(constant) = field.constants.get(&name) {
                spec = spec.with_attributes(constant.attributes.clone());
                if let Some(err) = non_empty(constant.err.clone()) {
                    spec = spec.with_error(err);
                }
            }
            builder = builder.validator_spec(spec);
        }
        for name in field.operators {
            let mut spec = OperatorSpec::new(name.as_str());
            if let Some(constant) = field.constants.get(&format!("{OPERATOR_PREFIX}{name}")) {
                spec = spec.with_attributes(constant.attributes.clone());
            }
            builder = builder.operator_spec(spec);
        }

        if let Some(description) = non_empty(field.description) {
            builder = builder.description(description);
        }
        rules.push(build_rule(builder)?);
    }
    Ok(rules)
}
