//! Flat projection of nested JSON values
//!
//! Nested objects and arrays are projected onto a single-level map whose
//! keys are path segments joined by a separator (`user.tags.0`), and
//! projected back again. Array elements contribute their index as a numeric
//! segment. Empty objects and empty arrays are kept as terminal values so
//! that they survive a round trip.
//!
//! # Examples
//!
//! ```
//! use schematics_core::flat::{flatten, deflate};
//! use serde_json::json;
//!
//! let data = json!({"user": {"name": "Ada", "tags": ["a", "b"]}});
//! let flat = flatten(&data, "", ".");
//!
//! assert_eq!(flat["user.name"], json!("Ada"));
//! assert_eq!(flat["user.tags.1"], json!("b"));
//! assert_eq!(deflate(&flat, ".").unwrap(), data);
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

mod deflate;

pub use deflate::deflate;

use indexmap::IndexMap;
use serde_json::Value;

/// Single-level view of a nested value, in document order
pub type FlatView = IndexMap<String, Value>;

/// Flatten a nested value into a [`FlatView`]
///
/// Every key is prefixed with `prefix` (joined by `separator`) when the
/// prefix is non-empty. A scalar passed at the root with an empty prefix is
/// stored under the empty key.
pub fn flatten(value: &Value, prefix: &str, separator: &str) -> FlatView {
    let mut view = FlatView::new();
    flatten_into(value, prefix, separator, &mut view);
    view
}

fn flatten_into(value: &Value, path: &str, separator: &str, view: &mut FlatView) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let child_path = join_path(path, key, separator);
                flatten_into(child, &child_path, separator, view);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                let child_path = join_path(path, &index.to_string(), separator);
                flatten_into(child, &child_path, separator, view);
            }
        }
        _ => {
            view.insert(path.to_string(), value.clone());
        }
    }
}

/// Join a path prefix and a segment with the separator
pub fn join_path(prefix: &str, segment: &str, separator: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        let mut path = String::with_capacity(prefix.len() + separator.len() + segment.len());
        path.push_str(prefix);
        path.push_str(separator);
        path.push_str(segment);
        path
    }
}

/// Whether a path segment denotes an array index
///
/// Only canonical indices count: ASCII digits with no leading zero, so
/// `"0"` and `"00"` never address the same slot.
pub fn is_index_segment(segment: &str) -> bool {
    match segment.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}
