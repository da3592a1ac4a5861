//! Name-keyed tables of validator and operator functions
//!
//! Schemas refer to functions by name only. The engines resolve those names
//! through a [`ValidatorRegistry`] and an [`OperatorRegistry`], two
//! independent namespaces that start out holding the built-in set from
//! [`builtin`]. Callers may add functions or replace a built-in by
//! registering under the same name; the last registration wins.
//!
//! # Examples
//!
//! ```
//! use schematics_core::registry::{OperatorRegistry, ValidatorRegistry};
//! use schematics_core::FunctionError;
//! use serde_json::{json, Map};
//!
//! let mut validators = ValidatorRegistry::new();
//! validators.register("IsEven", |value, _attrs| match value.as_i64() {
//!     Some(n) if n % 2 == 0 => Ok(()),
//!     _ => Err(FunctionError::new("is not an even number")),
//! });
//! assert!(validators.contains("IsEven"));
//! assert!(validators.contains("IsString"));
//!
//! let operators = OperatorRegistry::new();
//! let upper = operators.get("UpperCase").unwrap();
//! assert_eq!(upper(&json!("abc"), &Map::new()).unwrap(), Some(json!("ABC")));
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod builtin;

use crate::error::FunctionError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Named arguments passed to a function, taken from the schema
pub type Attributes = Map<String, Value>;

/// Validator contract: accept the value or reject it with a message
pub type ValidatorFn =
    Arc<dyn Fn(&Value, &Attributes) -> Result<(), FunctionError> + Send + Sync>;

/// Operator contract: `Ok(None)` leaves the value unchanged
pub type OperatorFn =
    Arc<dyn Fn(&Value, &Attributes) -> Result<Option<Value>, FunctionError> + Send + Sync>;

/// Name-keyed table of validator functions
#[derive(Clone)]
pub struct ValidatorRegistry {
    functions: IndexMap<String, ValidatorFn>,
}

impl ValidatorRegistry {
    /// Create a registry preloaded with the built-in validators
    pub fn new() -> Self {
        let mut registry = Self::empty();
        builtin::register_validators(&mut registry);
        tracing::debug!(count = registry.len(), "loaded built-in validators");
        registry
    }

    /// Create a registry with no functions
    pub fn empty() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Register a validator, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&Value, &Attributes) -> Result<(), FunctionError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(validator = %name, "registering validator");
        self.functions.insert(name, Arc::new(function));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("names", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Name-keyed table of operator functions
#[derive(Clone)]
pub struct OperatorRegistry {
    functions: IndexMap<String, OperatorFn>,
}

impl OperatorRegistry {
    /// Create a registry preloaded with the built-in operators
    pub fn new() -> Self {
        let mut registry = Self::empty();
        builtin::register_operators(&mut registry);
        tracing::debug!(count = registry.len(), "loaded built-in operators");
        registry
    }

    /// Create a registry with no functions
    pub fn empty() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Register an operator, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, function: F) -> &mut Self
    where
        F: Fn(&Value, &Attributes) -> Result<Option<Value>, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        tracing::debug!(operator = %name, "registering operator");
        self.functions.insert(name, Arc::new(function));
        self
    }

    pub fn get(&self, name: &str) -> Option<&OperatorFn> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("names", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtins_preloaded() {
        let validators = ValidatorRegistry::new();
        for name in ["IsString", "IsEmail", "IsURL", "IsNumber", "IsValidDate", "ArrayLengthMax"] {
            assert!(validators.contains(name), "missing validator {}", name);
        }

        let operators = OperatorRegistry::default();
        for name in ["Capitalize", "UpperCase", "LowerCase", "Trim", "Add", "Divide"] {
            assert!(operators.contains(name), "missing operator {}", name);
        }
    }

    #[test]
    fn test_empty_registries() {
        assert!(ValidatorRegistry::empty().is_empty());
        assert!(OperatorRegistry::empty().get("UpperCase").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut validators = ValidatorRegistry::new();
        let before = validators.len();
        validators.register("IsString", |_, _| Err(FunctionError::new("overridden")));
        assert_eq!(validators.len(), before);

        let check = validators.get("IsString").unwrap();
        assert_eq!(
            check(&json!("text"), &Attributes::new()),
            Err(FunctionError::new("overridden"))
        );
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut operators = OperatorRegistry::empty();
        operators
            .register("Second", |_, _| Ok(None))
            .register("First", |_, _| Ok(None));
        assert_eq!(operators.names().collect::<Vec<_>>(), vec!["Second", "First"]);
    }

    #[test]
    fn test_registries_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidatorRegistry>();
        assert_send_sync::<OperatorRegistry>();
    }
}
