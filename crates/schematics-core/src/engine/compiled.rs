//! Compiled field rules
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

use crate::flat::FlatView;
use crate::path::{find_matches, PathPattern};
use crate::schema::FieldRule;
use crate::Result;

/// A field rule with its patterns compiled against the engine separator
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: FieldRule,
    pub pattern: PathPattern,
    pub depends_on: Vec<PathPattern>,
}

impl CompiledRule {
    pub fn compile(rule: &FieldRule, separator: &str) -> Result<Self> {
        let mut rule = rule.clone();
        rule.absorb_presence_markers();

        let pattern = PathPattern::compile(&rule.target_key, separator)?;
        let depends_on = rule
            .depends_on
            .iter()
            .map(|dependency| PathPattern::compile(dependency, separator))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rule,
            pattern,
            depends_on,
        })
    }

    /// First dependency pattern with no match in the view
    pub fn missing_dependency(&self, view: &FlatView) -> Option<&PathPattern> {
        self.depends_on
            .iter()
            .find(|dependency| find_matches(view, dependency).is_empty())
    }

    pub fn target(&self) -> &str {
        &self.rule.target_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::flatten;
    use crate::schema::FieldRuleBuilder;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_compile_and_missing_dependency() {
        let rule = FieldRuleBuilder::new("shipping.address")
            .depends_on("shipping.method")
            .depends_on("items.*.sku")
            .build()
            .unwrap();
        let compiled = CompiledRule::compile(&rule, ".").unwrap();

        let complete = flatten(
            &json!({"shipping": {"method": "post"}, "items": [{"sku": "a"}]}),
            "",
            ".",
        );
        assert!(compiled.missing_dependency(&complete).is_none());

        let partial = flatten(&json!({"shipping": {"method": "post"}}), "", ".");
        assert_eq!(compiled.missing_dependency(&partial).unwrap().as_str(), "items.*.sku");
    }

    #[test]
    fn test_compile_rejects_empty_pattern() {
        let rule = FieldRule::new("");
        assert!(matches!(
            CompiledRule::compile(&rule, "."),
            Err(Error::InvalidPattern { .. })
        ));
    }
}
