//! Rebuild nested values from a flat view
//!
//! Keys are first folded into a segment tree. Only once every key is in
//! place is the container kind of each prefix decided: a prefix whose
//! children are all numeric becomes an array, one whose children are all
//! non-numeric becomes an object, and a prefix mixing both is rejected.
//! Deciding per prefix rather than per key keeps the result independent of
//! the order the keys are visited in.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use super::{is_index_segment, join_path, FlatView};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Largest array index accepted when rebuilding arrays
const MAX_ARRAY_INDEX: usize = 1 << 20;

enum Node {
    Leaf(Value),
    Branch(IndexMap<String, Node>),
}

/// Rebuild the nested value described by a [`FlatView`]
///
/// An empty view yields an empty object. A view holding only the empty key
/// yields that value unchanged, which mirrors how [`super::flatten`] stores
/// a scalar root.
pub fn deflate(view: &FlatView, separator: &str) -> Result<Value> {
    if separator.is_empty() {
        return Err(Error::configuration("separator must not be empty"));
    }

    if let Some(root) = view.get("") {
        if view.len() == 1 {
            return Ok(root.clone());
        }
        return Err(Error::PathConflict {
            path: String::new(),
        });
    }

    let mut root: IndexMap<String, Node> = IndexMap::new();
    for (key, value) in view {
        let segments: Vec<&str> = key.split(separator).collect();
        insert(&mut root, &segments, value.clone(), "", separator)?;
    }

    build_branch(root, "", separator)
}

fn insert(
    branch: &mut IndexMap<String, Node>,
    segments: &[&str],
    value: Value,
    prefix: &str,
    separator: &str,
) -> Result<()> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(());
    };
    let path = join_path(prefix, head, separator);

    if rest.is_empty() {
        if branch.contains_key(*head) {
            return Err(Error::PathConflict { path });
        }
        branch.insert(head.to_string(), Node::Leaf(value));
        return Ok(());
    }

    let node = branch
        .entry(head.to_string())
        .or_insert_with(|| Node::Branch(IndexMap::new()));

    match node {
        Node::Branch(children) => insert(children, rest, value, &path, separator),
        Node::Leaf(_) => Err(Error::PathConflict { path }),
    }
}

fn build_node(node: Node, path: &str, separator: &str) -> Result<Value> {
    match node {
        Node::Leaf(value) => Ok(value),
        Node::Branch(children) => build_branch(children, path, separator),
    }
}

fn build_branch(children: IndexMap<String, Node>, prefix: &str, separator: &str) -> Result<Value> {
    let numeric = children.keys().filter(|k| is_index_segment(k)).count();

    if numeric == 0 {
        let mut map = Map::with_capacity(children.len());
        for (key, child) in children {
            let path = join_path(prefix, &key, separator);
            let value = build_node(child, &path, separator)?;
            map.insert(key, value);
        }
        return Ok(Value::Object(map));
    }

    if numeric != children.len() {
        return Err(Error::AmbiguousContainer {
            prefix: prefix.to_string(),
        });
    }

    let mut indexed = Vec::with_capacity(children.len());
    for (key, child) in children {
        let path = join_path(prefix, &key, separator);
        let index = match key.parse::<usize>() {
            Ok(index) if index <= MAX_ARRAY_INDEX => index,
            _ => return Err(Error::IndexOutOfRange { path, index: key }),
        };
        indexed.push((index, child, path));
    }

    let len = indexed.iter().map(|(index, _, _)| index + 1).max().unwrap_or(0);
    let mut items = vec![Value::Null; len];
    for (index, child, path) in indexed {
        items[index] = build_node(child, &path, separator)?;
    }

    Ok(Value::Array(items))
}
