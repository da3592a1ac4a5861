//! Builder for creating field rules
//!
//! This module provides a fluent builder API for constructing field rules
//! in code, with the target key checked at build time.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::types::{FieldRule, Localized, OperatorSpec, ValidatorSpec};
use crate::{Error, Result};

/// Builder for creating field rules
#[derive(Debug, Clone)]
pub struct FieldRuleBuilder {
    target_key: String,
    required: bool,
    depends_on: Vec<String>,
    validators: Vec<ValidatorSpec>,
    operators: Vec<OperatorSpec>,
    l10n: Localized,
    name: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    additional_information: Option<String>,
}

impl FieldRuleBuilder {
    /// Create a new rule builder for a target key pattern
    pub fn new(target_key: impl Into<String>) -> Self {
        Self {
            target_key: target_key.into(),
            required: false,
            depends_on: Vec::new(),
            validators: Vec::new(),
            operators: Vec::new(),
            l10n: Localized::new(),
            name: None,
            display_name: None,
            description: None,
            additional_information: None,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a dependency pattern
    pub fn depends_on(mut self, pattern: impl Into<String>) -> Self {
        self.depends_on.push(pattern.into());
        self
    }

    /// Append a validator with no attributes
    pub fn validator(self, name: impl Into<String>) -> Self {
        self.validator_spec(ValidatorSpec::new(name))
    }

    /// Append a fully specified validator
    pub fn validator_spec(mut self, spec: ValidatorSpec) -> Self {
        self.validators.push(spec);
        self
    }

    /// Append an operator with no attributes
    pub fn operator(self, name: impl Into<String>) -> Self {
        self.operator_spec(OperatorSpec::new(name))
    }

    /// Append a fully specified operator
    pub fn operator_spec(mut self, spec: OperatorSpec) -> Self {
        self.operators.push(spec);
        self
    }

    /// Set the field-level message for a locale
    pub fn l10n(mut self, locale: impl Into<String>, message: impl Into<String>) -> Self {
        self.l10n.insert(locale.into(), message.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn additional_information(mut self, info: impl Into<String>) -> Self {
        self.additional_information = Some(info.into());
        self
    }

    /// Build the field rule
    pub fn build(self) -> Result<FieldRule> {
        if self.target_key.is_empty() {
            return Err(Error::configuration("field rule target_key must not be empty"));
        }
        if let Some(empty) = self.depends_on.iter().position(String::is_empty) {
            return Err(Error::configuration(format!(
                "dependency {} of '{}' is empty",
                empty, self.target_key
            )));
        }

        let mut rule = FieldRule {
            target_key: self.target_key,
            required: self.required,
            depends_on: self.depends_on,
            validators: self.validators,
            operators: self.operators,
            l10n: self.l10n,
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            additional_information: self.additional_information,
        };
        rule.absorb_presence_markers();
        Ok(rule)
    }
}
