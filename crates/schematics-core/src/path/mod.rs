//! Wildcard path patterns over flat keys
//!
//! A schema rule addresses data through a target key pattern such as
//! `items.*.price`. Patterns are compiled once into a [`PathPattern`] and
//! tested against the keys of a [`FlatView`](crate::flat::FlatView). A
//! segment that is exactly `*` matches one array index and nothing else.
//!
//! # Examples
//!
//! ```
//! use schematics_core::path::PathPattern;
//!
//! let pattern = PathPattern::compile("items.*.price", ".").unwrap();
//! assert!(pattern.test("items.12.price"));
//! assert!(!pattern.test("items.abc.price"));
//! assert_eq!(pattern.captures("items.3.price"), Some(vec![3]));
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

mod pattern;

#[cfg(test)]
mod prop_tests;

pub use pattern::{find_matches, MatchSet, PathPattern, WILDCARD};
