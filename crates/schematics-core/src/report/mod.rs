//! Structured, localized validation error reporting
//!
//! Data-quality problems found by the validation engine are collected as
//! [`ErrorRecord`]s in an [`ErrorCollection`]. Records carry one message
//! per locale and, for collection input, the identity of the row they came
//! from. Collections from different rows merge by `(row, target)`, and are
//! rendered through a `%placeholder` template.
//!
//! # Examples
//!
//! ```
//! use schematics_core::report::{ErrorCollection, DEFAULT_TEMPLATE};
//! use serde_json::json;
//!
//! let mut errors = ErrorCollection::new();
//! errors.add_error("IsEmail", "user.email", "not an email", json!("nope"));
//!
//! assert!(errors.has_errors());
//! assert_eq!(
//!     errors.collapse("en", "%target: %message", None).unwrap(),
//!     "user.email: not an email"
//! );
//! assert_eq!(errors.render("en", DEFAULT_TEMPLATE).len(), 1);
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

mod collection;
mod record;
mod template;

pub use collection::ErrorCollection;
pub use record::ErrorRecord;
pub use template::{format_record, DEFAULT_JOIN, DEFAULT_TEMPLATE};

/// Validator name recorded when a required field has no match
pub const REQUIRED_VALIDATOR: &str = "is-required";

/// Validator name recorded when a dependency pattern has no match
pub const DEPENDS_ON_VALIDATOR: &str = "depends-on";

/// Built-in message for a missing required field
pub const REQUIRED_MESSAGE: &str = "this field is required";

/// Built-in message for a field whose dependencies are absent
pub const DEPENDS_ON_MESSAGE: &str = "this field depends on other values which do not exist";
