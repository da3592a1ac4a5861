//! Transform engine
//!
//! Rules run in schema order against a single flat view of each object, so
//! a rule sees the output of every rule before it. Each matched value is fed
//! through the rule's operator chain; an operator returning `None` passes
//! its input on unchanged. The view is rebuilt into a nested value once all
//! rules have run.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::compiled::CompiledRule;
use super::ensure_object_rows;
use crate::config::EngineConfig;
use crate::flat::{deflate, flatten, FlatView};
use crate::path::find_matches;
use crate::registry::{OperatorFn, OperatorRegistry};
use crate::schema::{OperatorSpec, SchemaDocument};
use crate::{Error, Result};
use serde_json::Value;
use tracing::{debug, instrument, trace};

struct ResolvedOperator {
    spec: OperatorSpec,
    function: OperatorFn,
}

struct TransformRule {
    compiled: CompiledRule,
    operators: Vec<ResolvedOperator>,
}

/// Applies a schema's operator chains and rebuilds the nested shape
pub struct TransformEngine {
    rules: Vec<TransformRule>,
    config: EngineConfig,
}

impl TransformEngine {
    /// Compile `schema` and resolve its operators against `registry`
    ///
    /// Fails with [`Error::UnknownOperator`] when a rule names a function
    /// the registry does not hold.
    pub fn new(
        schema: &SchemaDocument,
        registry: OperatorRegistry,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut rules = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            if field.operators.is_empty() {
                continue;
            }
            let compiled = CompiledRule::compile(field, &config.separator)?;
            let mut operators = Vec::with_capacity(field.operators.len());
            for spec in &field.operators {
                let function = registry
                    .get(&spec.name)
                    .cloned()
                    .ok_or_else(|| Error::UnknownOperator {
                        name: spec.name.clone(),
                        target: field.target_key.clone(),
                    })?;
                operators.push(ResolvedOperator {
                    spec: spec.clone(),
                    function,
                });
            }
            rules.push(TransformRule { compiled, operators });
        }

        debug!(rules = rules.len(), version = %schema.version, "transform engine ready");
        Ok(Self { rules, config })
    }

    /// Build an engine with the built-in operators and default configuration
    pub fn with_defaults(schema: &SchemaDocument) -> Result<Self> {
        Self::new(schema, OperatorRegistry::new(), EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Transform an object or every object of a collection
    #[instrument(skip_all)]
    pub fn operate(&self, data: &Value) -> Result<Value> {
        match data {
            Value::Object(_) => self.operate_object(data),
            Value::Array(rows) => self.operate_array(rows).map(Value::Array),
            other => Err(Error::invalid_shape(other)),
        }
    }

    /// Transform one object
    pub fn operate_object(&self, data: &Value) -> Result<Value> {
        if !data.is_object() {
            return Err(Error::invalid_shape(data));
        }
        let mut view = flatten(data, "", &self.config.separator);
        self.apply(&mut view)?;
        deflate(&view, &self.config.separator)
    }

    /// Transform every row of a collection, keeping row order
    pub fn operate_array(&self, rows: &[Value]) -> Result<Vec<Value>> {
        ensure_object_rows(rows)?;
        rows.iter().map(|row| self.operate_object(row)).collect()
    }

    /// Run every rule against a flat view in place
    pub fn apply(&self, view: &mut FlatView) -> Result<()> {
        for rule in &self.rules {
            let keys: Vec<String> = find_matches(view, &rule.compiled.pattern)
                .keys()
                .map(str::to_string)
                .collect();
            if keys.is_empty() {
                continue;
            }
            debug!(field = rule.compiled.target(), matches = keys.len(), "applying operators");

            for key in keys {
                let Some(current) = view.get(&key) else {
                    continue;
                };
                let updated = rule.run_chain(&key, current)?;
                if let Some(value) = updated {
                    view.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

impl TransformRule {
    /// Run the operator chain, returning `None` when no operator changed the value
    fn run_chain(&self, key: &str, input: &Value) -> Result<Option<Value>> {
        let mut current: Option<Value> = None;
        for operator in &self.operators {
            let value = current.as_ref().unwrap_or(input);
            match (operator.function)(value, &operator.spec.attributes) {
                Ok(Some(next)) => {
                    trace!(
                        key,
                        operator = %operator.spec.name,
                        from = %value,
                        to = %next,
                        "operator applied"
                    );
                    current = Some(next);
                }
                Ok(None) => {
                    trace!(key, operator = %operator.spec.name, "operator left value unchanged");
                }
                Err(failure) => {
                    return Err(Error::Operator {
                        operator: operator.spec.name.clone(),
                        target: key.to_string(),
                        message: failure.message,
                    });
                }
            }
        }
        Ok(current)
    }
}
