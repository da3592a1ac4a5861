//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! documents and path segments for property testing.

#![cfg(test)]

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for object keys that can never be mistaken for array indices
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

/// Strategy for scalar leaves
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 .@-]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for nested values with controlled depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(
        4,  // max depth
        32, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..5).prop_map(Value::Array),
                btree_map(segment_strategy(), inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
            ]
        },
    )
}

/// Strategy for an object document, the shape the engines accept
pub fn json_document_strategy() -> impl Strategy<Value = Value> {
    btree_map(segment_strategy(), json_value_strategy(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// Strategy for a collection of object documents
pub fn json_rows_strategy() -> impl Strategy<Value = Value> {
    vec(json_document_strategy(), 0..6).prop_map(Value::Array)
}
