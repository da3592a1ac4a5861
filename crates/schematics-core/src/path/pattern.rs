//! Compiled target key patterns and match sets
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use crate::flat::FlatView;
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Segment placeholder matching exactly one array index
pub const WILDCARD: &str = "*";

/// Canonical array index: ASCII digits, no leading zero
const INDEX_EXPRESSION: &str = "(0|[1-9][0-9]*)";

/// A target key pattern compiled against a separator
#[derive(Clone)]
pub struct PathPattern {
    source: String,
    separator: String,
    regex: Regex,
    wildcards: usize,
}

impl PathPattern {
    /// Compile `pattern` into an anchored matcher
    ///
    /// Every segment is matched literally except a segment that is exactly
    /// `*`, which matches one canonical array index: ASCII digits with no
    /// leading zero, as [`flatten`](crate::flat::flatten) writes them. A `*`
    /// inside a longer segment is a literal asterisk.
    pub fn compile(pattern: &str, separator: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: "pattern must not be empty".to_string(),
            });
        }
        if separator.is_empty() {
            return Err(Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: "separator must not be empty".to_string(),
            });
        }

        let mut wildcards = 0;
        let segments: Vec<String> = pattern
            .split(separator)
            .map(|segment| {
                if segment == WILDCARD {
                    wildcards += 1;
                    INDEX_EXPRESSION.to_string()
                } else {
                    regex::escape(segment)
                }
            })
            .collect();

        let expression = format!("^{}$", segments.join(&regex::escape(separator)));
        let regex = Regex::new(&expression).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            separator: separator.to_string(),
            regex,
            wildcards,
        })
    }

    /// Whether `flat_key` is addressed by this pattern
    pub fn test(&self, flat_key: &str) -> bool {
        self.regex.is_match(flat_key)
    }

    /// Array indices bound to the wildcards, in pattern order
    ///
    /// Returns `None` when the key does not match or an index does not fit
    /// in `usize`.
    pub fn captures(&self, flat_key: &str) -> Option<Vec<usize>> {
        let caps = self.regex.captures(flat_key)?;
        caps.iter()
            .skip(1)
            .map(|group| group.and_then(|m| m.as_str().parse().ok()))
            .collect()
    }

    /// The pattern text as written in the schema
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Separator the pattern was compiled with
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn has_wildcards(&self) -> bool {
        self.wildcards > 0
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("pattern", &self.source)
            .field("separator", &self.separator)
            .field("wildcards", &self.wildcards)
            .finish()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.separator == other.separator
    }
}

impl Eq for PathPattern {}

/// Entries of a [`FlatView`] matched by one pattern, in view order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet<'a> {
    entries: Vec<(&'a str, &'a Value)>,
}

impl<'a> MatchSet<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.entries.iter().copied()
    }

    /// Matched keys, in view order
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}

impl<'a> IntoIterator for MatchSet<'a> {
    type Item = (&'a str, &'a Value);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Apply a compiled pattern to every key of a view
pub fn find_matches<'a>(view: &'a FlatView, pattern: &PathPattern) -> MatchSet<'a> {
    let entries = view
        .iter()
        .filter(|(key, _)| pattern.test(key))
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    MatchSet { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::flatten;
    use serde_json::json;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::compile("user.name", ".").unwrap();
        assert!(pattern.test("user.name"));
        assert!(!pattern.test("user.names"));
        assert!(!pattern.test("xuser.name"));
        assert!(!pattern.test("user"));
        assert!(!pattern.has_wildcards());
    }

    #[test]
    fn test_wildcard_matches_digits_only() {
        let pattern = PathPattern::compile("items.*.price", ".").unwrap();
        assert!(pattern.test("items.0.price"));
        assert!(pattern.test("items.12.price"));
        assert!(!pattern.test("items.abc.price"));
        assert!(!pattern.test("items.price"));
        assert!(!pattern.test("items.1.2.price"));
        assert!(!pattern.test("items..price"));
    }

    #[test]
    fn test_wildcard_rejects_non_index_digits() {
        let pattern = PathPattern::compile("items.*.price", ".").unwrap();
        assert!(!pattern.test("items.٣.price"));
        assert!(!pattern.test("items.０.price"));
        assert!(!pattern.test("items.01.price"));
        assert_eq!(pattern.captures("items.10.price"), Some(vec![10]));

        let view = flatten(&json!({"items": {"٣": {"price": 1}, "01": {"price": 2}}}), "", ".");
        assert!(find_matches(&view, &pattern).is_empty());
    }

    #[test]
    fn test_separator_is_not_a_regex_wildcard() {
        let pattern = PathPattern::compile("a.b", ".").unwrap();
        assert!(!pattern.test("aXb"));

        let pattern = PathPattern::compile("a+b|c", "|").unwrap();
        assert!(pattern.test("a+b|c"));
        assert!(!pattern.test("aab|c"));
    }

    #[test]
    fn test_embedded_star_is_literal() {
        let pattern = PathPattern::compile("notes.a*b", ".").unwrap();
        assert!(pattern.test("notes.a*b"));
        assert!(!pattern.test("notes.a1b"));
        assert!(!pattern.test("notes.ab"));
    }

    #[test]
    fn test_custom_separator() {
        let pattern = PathPattern::compile("rows/*/id", "/").unwrap();
        assert!(pattern.test("rows/3/id"));
        assert!(!pattern.test("rows.3.id"));
        assert_eq!(pattern.separator(), "/");
    }

    #[test]
    fn test_captures_bind_indices() {
        let pattern = PathPattern::compile("a.*.b.*", ".").unwrap();
        assert_eq!(pattern.captures("a.2.b.15"), Some(vec![2, 15]));
        assert_eq!(pattern.captures("a.x.b.1"), None);

        let literal = PathPattern::compile("a.b", ".").unwrap();
        assert_eq!(literal.captures("a.b"), Some(vec![]));
    }

    #[test]
    fn test_malformed_patterns_are_errors() {
        assert!(matches!(
            PathPattern::compile("", "."),
            Err(Error::InvalidPattern { .. })
        ));
        assert!(matches!(
            PathPattern::compile("a.b", ""),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_find_matches_preserves_view_order() {
        let data = json!({
            "items": [{"price": 3}, {"name": "x"}, {"price": 5}],
            "price": 9
        });
        let view = flatten(&data, "", ".");
        let pattern = PathPattern::compile("items.*.price", ".").unwrap();

        let matches = find_matches(&view, &pattern);
        assert_eq!(matches.len(), 2);
        let keys: Vec<&str> = matches.keys().collect();
        assert_eq!(keys, vec!["items.0.price", "items.2.price"]);
        let values: Vec<&Value> = matches.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![&json!(3), &json!(5)]);
    }

    #[test]
    fn test_find_matches_empty() {
        let view = flatten(&json!({"a": 1}), "", ".");
        let pattern = PathPattern::compile("b", ".").unwrap();
        assert!(find_matches(&view, &pattern).is_empty());
    }
}
