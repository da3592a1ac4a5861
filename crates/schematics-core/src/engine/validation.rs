//! Validation engine
//!
//! For every field rule the engine looks up the keys its pattern matches in
//! the flattened input. A rule with no match is reported only when it is
//! required. A rule whose dependencies are not all present is reported once
//! and skipped. Otherwise each matched value runs through the validator
//! chain, which stops at the first failure.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::compiled::CompiledRule;
use super::{ensure_object_rows, fallback_row_id};
use crate::config::EngineConfig;
use crate::error::FunctionError;
use crate::flat::{flatten, FlatView};
use crate::path::find_matches;
use crate::registry::{ValidatorFn, ValidatorRegistry};
use crate::report::{
    ErrorCollection, ErrorRecord, DEPENDS_ON_MESSAGE, DEPENDS_ON_VALIDATOR, REQUIRED_MESSAGE,
    REQUIRED_VALIDATOR,
};
use crate::schema::{FieldRule, Localized, SchemaDocument, ValidatorSpec};
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

struct ResolvedValidator {
    spec: ValidatorSpec,
    function: ValidatorFn,
}

struct ValidationRule {
    compiled: CompiledRule,
    validators: Vec<ResolvedValidator>,
}

/// Evaluates a schema's required flags, dependencies and validators
pub struct ValidationEngine {
    rules: Vec<ValidationRule>,
    config: EngineConfig,
}

impl ValidationEngine {
    /// Compile `schema` and resolve its validators against `registry`
    ///
    /// Fails with [`Error::UnknownValidator`] when a rule names a function
    /// the registry does not hold, and with [`Error::InvalidPattern`] when a
    /// target or dependency pattern cannot be compiled.
    pub fn new(
        schema: &SchemaDocument,
        registry: ValidatorRegistry,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut rules = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let compiled = CompiledRule::compile(field, &config.separator)?;
            let mut validators = Vec::with_capacity(compiled.rule.validators.len());
            for spec in &compiled.rule.validators {
                let function = registry
                    .get(&spec.name)
                    .cloned()
                    .ok_or_else(|| Error::UnknownValidator {
                        name: spec.name.clone(),
                        target: field.target_key.clone(),
                    })?;
                validators.push(ResolvedValidator {
                    spec: spec.clone(),
                    function,
                });
            }
            rules.push(ValidationRule { compiled, validators });
        }

        debug!(rules = rules.len(), version = %schema.version, "validation engine ready");
        Ok(Self { rules, config })
    }

    /// Build an engine with the built-in validators and default configuration
    pub fn with_defaults(schema: &SchemaDocument) -> Result<Self> {
        Self::new(schema, ValidatorRegistry::new(), EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate an object or a collection of objects
    #[instrument(skip_all)]
    pub fn validate(&self, data: &Value) -> Result<ErrorCollection> {
        match data {
            Value::Object(_) => self.validate_object(data, None),
            Value::Array(rows) => self.validate_array(rows),
            other => Err(Error::invalid_shape(other)),
        }
    }

    /// Validate one object, tagging every record with `row_id` when given
    pub fn validate_object(&self, data: &Value, row_id: Option<&Value>) -> Result<ErrorCollection> {
        if !data.is_object() {
            return Err(Error::invalid_shape(data));
        }
        let view = flatten(data, "", &self.config.separator);
        Ok(self.validate_view(&view, row_id))
    }

    /// Validate every row of a collection and collect the results in row order
    ///
    /// Each row is identified by the value at the configured id key, or by
    /// `row-<index>` when the key is absent. Rows sharing an id keep their
    /// own records.
    pub fn validate_array(&self, rows: &[Value]) -> Result<ErrorCollection> {
        ensure_object_rows(rows)?;

        let per_row = self.validate_rows(rows);
        let mut errors = ErrorCollection::with_locale(self.config.locale.clone());
        for row_errors in per_row {
            errors.append_all(row_errors);
        }
        debug!(rows = rows.len(), errors = errors.len(), "validated collection");
        Ok(errors)
    }

    #[cfg(feature = "parallel")]
    fn validate_rows(&self, rows: &[Value]) -> Vec<ErrorCollection> {
        use rayon::prelude::*;

        if self.config.parallel_rows {
            rows.par_iter()
                .enumerate()
                .map(|(index, row)| self.validate_row(index, row))
                .collect()
        } else {
            rows.iter()
                .enumerate()
                .map(|(index, row)| self.validate_row(index, row))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn validate_rows(&self, rows: &[Value]) -> Vec<ErrorCollection> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.validate_row(index, row))
            .collect()
    }

    fn validate_row(&self, index: usize, row: &Value) -> ErrorCollection {
        let view = flatten(row, "", &self.config.separator);
        let row_id = self.row_id(&view, index);
        trace!(index, row_id = %row_id, "validating row");
        self.validate_view(&view, Some(&row_id))
    }

    fn row_id(&self, view: &FlatView, index: usize) -> Value {
        self.config
            .id_key
            .as_deref()
            .and_then(|key| view.get(key))
            .cloned()
            .unwrap_or_else(|| fallback_row_id(index))
    }

    fn validate_view(&self, view: &FlatView, row_id: Option<&Value>) -> ErrorCollection {
        let locale = self.config.locale.as_str();
        let mut errors = ErrorCollection::with_locale(locale);
        let tag = |record: ErrorRecord| match row_id {
            Some(id) => record.with_row_id(id.clone()),
            None => record,
        };

        for rule in &self.rules {
            let compiled = &rule.compiled;
            let matches = find_matches(view, &compiled.pattern);

            if matches.is_empty() {
                if compiled.rule.required {
                    debug!(field = compiled.target(), "required field missing");
                    let record =
                        ErrorRecord::new(REQUIRED_VALIDATOR, compiled.target(), Value::Null)
                            .with_message(locale, REQUIRED_MESSAGE);
                    errors.append(tag(record));
                }
                continue;
            }

            if let Some(missing) = compiled.missing_dependency(view) {
                debug!(
                    field = compiled.target(),
                    dependency = missing.as_str(),
                    "dependency missing"
                );
                let mut context = Map::new();
                context.insert("missing".to_string(), Value::String(missing.as_str().to_string()));
                let record = ErrorRecord::new(DEPENDS_ON_VALIDATOR, compiled.target(), Value::Null)
                    .with_message(locale, DEPENDS_ON_MESSAGE)
                    .with_context(context);
                errors.append(tag(record));
                continue;
            }

            for (key, value) in matches {
                trace!(
                    field = compiled.target(),
                    key,
                    indices = ?compiled.pattern.captures(key),
                    "evaluating"
                );
                for validator in &rule.validators {
                    if let Err(failure) = (validator.function)(value, &validator.spec.attributes) {
                        trace!(
                            key,
                            validator = %validator.spec.name,
                            error = %failure,
                            "validator rejected value"
                        );
                        let messages =
                            resolve_messages(locale, &validator.spec, &compiled.rule, &failure);
                        let mut record = ErrorRecord::new(&validator.spec.name, key, value.clone());
                        record.messages = messages;
                        errors.append(tag(record));
                        break;
                    }
                }
            }
        }

        errors
    }
}

/// Messages for a failed validator, keyed by locale
///
/// The active locale takes the first of: the validator's localized message,
/// the field's localized message, the validator's `error` text, the
/// function's own message. Other locales present in either override map are
/// carried along.
fn resolve_messages(
    locale: &str,
    spec: &ValidatorSpec,
    field: &FieldRule,
    failure: &FunctionError,
) -> Localized {
    let active = spec
        .l10n
        .get(locale)
        .or_else(|| field.l10n.get(locale))
        .or(spec.error.as_ref())
        .cloned()
        .unwrap_or_else(|| failure.message.clone());

    let mut messages = Localized::new();
    messages.insert(locale.to_string(), active);
    for (other, message) in spec.l10n.iter().chain(field.l10n.iter()) {
        messages.entry(other.clone()).or_insert_with(|| message.clone());
    }
    messages
}
