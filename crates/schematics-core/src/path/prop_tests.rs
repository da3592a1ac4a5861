//! Property-based tests for pattern matching and flat projection
//!
//! These tests check that wildcard patterns only ever bind array indices and
//! that flattening is reversible for generated documents.

use super::{find_matches, PathPattern};
use crate::flat::{deflate, flatten};
use crate::proptest_strategies::{json_document_strategy, segment_strategy};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wildcard_matches_any_index(index in 0usize..100_000, field in segment_strategy()) {
        let pattern = PathPattern::compile(&format!("rows.*.{}", field), ".").unwrap();
        let key = format!("rows.{}.{}", index, field);
        prop_assert!(pattern.test(&key));
        prop_assert_eq!(pattern.captures(&key), Some(vec![index]));
    }

    #[test]
    fn wildcard_never_matches_names(name in segment_strategy()) {
        let pattern = PathPattern::compile("rows.*", ".").unwrap();
        let candidate = format!("rows.{}", name);
        prop_assert!(!pattern.test(&candidate));
    }

    #[test]
    fn literal_pattern_matches_itself_only(
        a in segment_strategy(),
        b in segment_strategy(),
        c in segment_strategy(),
    ) {
        let key = format!("{}.{}", a, b);
        let pattern = PathPattern::compile(&key, ".").unwrap();
        prop_assert!(pattern.test(&key));
        let extended = format!("{}.{}", key, c);
        prop_assert!(!pattern.test(&extended));
    }

    #[test]
    fn flatten_then_deflate_round_trips(doc in json_document_strategy()) {
        let view = flatten(&doc, "", ".");
        let rebuilt = deflate(&view, ".").unwrap();
        prop_assert_eq!(rebuilt, doc);
    }

    #[test]
    fn every_flat_key_matches_its_own_pattern(doc in json_document_strategy()) {
        let view = flatten(&doc, "", ".");
        for key in view.keys().filter(|k| !k.is_empty()) {
            let pattern = PathPattern::compile(key, ".").unwrap();
            prop_assert_eq!(find_matches(&view, &pattern).len(), 1);
        }
    }
}
