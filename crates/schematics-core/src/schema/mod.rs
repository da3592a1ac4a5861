//! Canonical schema model
//!
//! A [`SchemaDocument`] is an ordered list of [`FieldRule`]s. Each rule names
//! a target key pattern and the validators and operators applied to every
//! value the pattern matches. Versioned schema dialects are decoded into
//! this model outside the core; rules can also be assembled in code with
//! [`FieldRuleBuilder`].
//!
//! # Examples
//!
//! ```
//! use schematics_core::schema::{FieldRuleBuilder, SchemaDocument, ValidatorSpec};
//! use serde_json::json;
//!
//! let rule = FieldRuleBuilder::new("user.age")
//!     .required()
//!     .validator("IsNumber")
//!     .validator_spec(ValidatorSpec::new("MinAllowed").with_attribute("min", json!(18)))
//!     .build()
//!     .unwrap();
//!
//! let schema = SchemaDocument::new("2").with_field(rule);
//! assert_eq!(schema.fields.len(), 1);
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

mod builder;
mod types;

pub use builder::FieldRuleBuilder;
pub use types::{
    is_presence_marker, FieldRule, Localized, OperatorSpec, SchemaDocument, ValidatorSpec,
};
