//! Validation and transform engines
//!
//! Both engines compile a [`SchemaDocument`](crate::schema::SchemaDocument)
//! once: target and dependency patterns become [`PathPattern`]s and every
//! function name is resolved against the registry the engine owns. A
//! schema naming an unregistered function is rejected when the engine is
//! built, so no call ever starts with a half-resolved rule set.
//!
//! # Module Organization
//!
//! - [`compiled`] - pattern compilation shared by both engines
//! - [`validation`] - required, dependency and validator evaluation
//! - [`transform`] - operator chains and reconstruction of nested values
//!
//! # Examples
//!
//! ```
//! use schematics_core::engine::{TransformEngine, ValidationEngine};
//! use schematics_core::schema::{FieldRuleBuilder, OperatorSpec, SchemaDocument};
//! use schematics_core::{EngineConfig, OperatorRegistry, ValidatorRegistry};
//! use serde_json::json;
//!
//! let email = FieldRuleBuilder::new("user.email").required().validator("IsEmail");
//! let name = FieldRuleBuilder::new("user.name").operator("Capitalize");
//! let schema = SchemaDocument::new("2")
//!     .with_field(email.build().unwrap())
//!     .with_field(name.build().unwrap());
//!
//! let config = EngineConfig::default();
//! let validator =
//!     ValidationEngine::new(&schema, ValidatorRegistry::new(), config.clone()).unwrap();
//! let errors = validator.validate(&json!({"user": {"email": "nope"}})).unwrap();
//! assert_eq!(errors.len(), 1);
//!
//! let transformer = TransformEngine::new(&schema, OperatorRegistry::new(), config).unwrap();
//! let out = transformer.operate(&json!({"user": {"name": "aDA"}})).unwrap();
//! assert_eq!(out, json!({"user": {"name": "Ada"}}));
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod compiled;
pub mod transform;
pub mod validation;


pub use transform::TransformEngine;
pub use validation::ValidationEngine;

use crate::{Error, Result};
use serde_json::Value;

/// Positional identity for a row without an id value
pub fn fallback_row_id(index: usize) -> Value {
    Value::String(format!("row-{}", index))
}

/// Reject a collection holding anything but objects
fn ensure_object_rows(rows: &[Value]) -> Result<()> {
    match rows.iter().find(|row| !row.is_object()) {
        Some(row) => Err(Error::invalid_shape(row)),
        None => Ok(()),
    }
}
