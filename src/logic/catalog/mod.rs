//! Rule Catalog Module
//!
//! Immutable registry of CIS hardening rules.
//! Built once (from the built-in table or a persisted catalog file) and then
//! passed by reference into the evaluator. There is no global instance.
//!
//! ## Structure
//! - `types`: Core types (Rule, Severity)
//! - `rules`: Built-in benchmark table

pub mod types;
pub mod rules;

use std::collections::{BTreeMap, HashSet};

use crate::error::{PipelineError, Result};

pub use types::{Rule, Severity};
pub use rules::{builtin_rules, SSH_CATEGORY};

/// Read-only collection of rules keyed by `rule_id`
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Build a catalog, rejecting duplicate rule ids
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.rule_id.as_str()) {
                return Err(PipelineError::schema(
                    "rule catalog",
                    format!("duplicate rule_id {}", rule.rule_id),
                ));
            }
        }
        Ok(Self { rules })
    }

    /// Catalog backed by the built-in benchmark table
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[cfg(test)]
    pub fn get(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.rule_id == rule_id)
    }

    /// First rule for a (category, parameter) pair, in table order
    pub fn find(&self, category: &str, parameter: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.matches(category, parameter))
    }

    /// Like `find`, but a missing rule is an error
    pub fn require(&self, category: &str, parameter: &str) -> Result<&Rule> {
        self.find(category, parameter)
            .ok_or_else(|| PipelineError::MissingRule {
                category: category.to_string(),
                parameter: parameter.to_string(),
            })
    }

    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for rule in &self.rules {
            *counts.entry(rule.severity).or_insert(0) += 1;
        }
        counts
    }

    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for rule in &self.rules {
            *counts.entry(rule.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::rules::FILE_PERM_CATEGORY;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.get("CIS-5.2.8").unwrap().parameter, "PermitRootLogin");
        assert_eq!(catalog.get("CIS-6.1.3").unwrap().expected_value, "640");
    }

    #[test]
    fn test_builtin_statistics() {
        let catalog = RuleCatalog::builtin();
        let by_severity = catalog.severity_counts();
        assert_eq!(by_severity.get(&Severity::High), Some(&4));
        assert_eq!(by_severity.get(&Severity::Critical), Some(&3));

        let by_category = catalog.category_counts();
        assert_eq!(by_category.get(SSH_CATEGORY), Some(&5));
        assert_eq!(by_category.get(FILE_PERM_CATEGORY), Some(&2));
    }

    #[test]
    fn test_find_is_category_scoped() {
        let catalog = RuleCatalog::builtin();
        // file_permissions exists under both categories
        assert_eq!(catalog.find(SSH_CATEGORY, "file_permissions").unwrap().rule_id, "CIS-5.2.1");
        assert_eq!(catalog.find(FILE_PERM_CATEGORY, "file_permissions").unwrap().rule_id, "CIS-6.1.2");
        assert!(catalog.find(FILE_PERM_CATEGORY, "PermitRootLogin").is_none());
    }

    #[test]
    fn test_require_missing_rule() {
        let catalog = RuleCatalog::new(vec![]).unwrap();
        match catalog.require(SSH_CATEGORY, "PermitRootLogin") {
            Err(PipelineError::MissingRule { parameter, .. }) => assert_eq!(parameter, "PermitRootLogin"),
            other => panic!("Expected MissingRule, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_rule_id_rejected() {
        let mut rules = builtin_rules();
        rules.push(rules[0].clone());
        assert!(matches!(
            RuleCatalog::new(rules),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }
}
