//! Schematics Core - schema-driven validation and transformation of nested JSON
//!
//! This crate validates and transforms arbitrarily nested JSON data against
//! externally configured field rules, without knowing the shape of the data
//! at compile time.
//!
//! # Main Components
//!
//! - **Flat Projection** ([`flat`]): nested values to and from single-level
//!   maps keyed by separator-joined paths
//! - **Path Patterns** ([`path`]): target key patterns with `*` array wildcards
//! - **Function Registries** ([`registry`]): name-keyed validators and operators,
//!   preloaded with the built-in set
//! - **Schema Model** ([`schema`]): ordered field rules
//! - **Engines** ([`engine`]): validation and transformation over single
//!   objects and collections of rows
//! - **Error Reporting** ([`report`]): localized, mergeable error records
//!
//! # Example
//!
//! ```
//! use schematics_core::{EngineConfig, ValidationEngine, ValidatorRegistry};
//! use schematics_core::schema::{FieldRuleBuilder, SchemaDocument, ValidatorSpec};
//! use serde_json::json;
//!
//! fn example() -> schematics_core::Result<()> {
//!     let schema = SchemaDocument::new("2").with_field(
//!         FieldRuleBuilder::new("items.*.price")
//!             .required()
//!             .validator_spec(ValidatorSpec::new("MinAllowed").with_attribute("min", json!(0)))
//!             .build()?,
//!     );
//!
//!     let config = EngineConfig::default();
//!     let engine = ValidationEngine::new(&schema, ValidatorRegistry::new(), config)?;
//!     let errors = engine.validate(&json!({"items": [{"price": 3}, {"price": -1}]}))?;
//!
//!     assert_eq!(errors.len(), 1);
//!     assert_eq!(errors.iter().next().unwrap().target, "items.1.price");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod engine;
pub mod error;
pub mod flat;
pub mod path;
pub mod registry;
pub mod report;
pub mod schema;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use engine::{TransformEngine, ValidationEngine};
pub use error::{Error, FunctionError, Result, ValueKind};
pub use flat::{deflate, flatten, FlatView};
pub use path::{find_matches, MatchSet, PathPattern};
pub use registry::{Attributes, OperatorFn, OperatorRegistry, ValidatorFn, ValidatorRegistry};
pub use report::{ErrorCollection, ErrorRecord};
pub use schema::{FieldRule, FieldRuleBuilder, OperatorSpec, SchemaDocument, ValidatorSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
