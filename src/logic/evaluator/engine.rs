//! Compliance Evaluator
//!
//! Labeling logic only - no types, no persistence.
//! Input: Configuration + RuleCatalog
//! Output: LabeledRecord
//! Deterministic; output order follows configuration order, then check order.

use std::collections::BTreeMap;

use crate::constants::NOT_SET;
use crate::error::{PipelineError, Result};
use crate::logic::catalog::{RuleCatalog, Severity, SSH_CATEGORY};
use crate::logic::generator::{
    is_permissive_mode, Category, Configuration, EXPECTED_PERMISSIONS_PARAM, FILE_PARAM,
    FILE_PERMISSIONS_PARAM,
};
use super::references::{permission_reference, AUTH_CHECKS};
use super::types::{Finding, LabeledRecord};

// ============================================================================
// MAIN EVALUATION FUNCTION
// ============================================================================

/// Label every configuration against the catalog
pub fn evaluate(configs: &[Configuration], catalog: &RuleCatalog) -> Result<Vec<LabeledRecord>> {
    let expected_len = configs.iter().map(|c| c.category.rules_per_config()).sum();
    let mut records = Vec::with_capacity(expected_len);

    for config in configs {
        for finding in evaluate_config(config, catalog)? {
            records.push(LabeledRecord::from_finding(config, finding));
        }
    }

    debug_assert_eq!(records.len(), expected_len);
    Ok(records)
}

/// Findings for a single configuration
pub fn evaluate_config(config: &Configuration, catalog: &RuleCatalog) -> Result<Vec<Finding>> {
    match config.category {
        Category::Ssh => check_authentication(config, catalog),
        Category::FilePermissions => Ok(vec![check_permissions(config)?]),
    }
}

// ============================================================================
// CHECKS
// ============================================================================

fn check_authentication(config: &Configuration, catalog: &RuleCatalog) -> Result<Vec<Finding>> {
    let mut findings = Vec::with_capacity(AUTH_CHECKS.len());

    for check in &AUTH_CHECKS {
        let rule = catalog.require(SSH_CATEGORY, check.parameter)?;
        let actual = config.parameter(check.parameter).unwrap_or(NOT_SET);
        let is_compliant = actual == rule.expected_value;

        findings.push(Finding {
            parameter: check.parameter.to_string(),
            expected_value: rule.expected_value.clone(),
            actual_value: actual.to_string(),
            is_compliant,
            // Fixed per-parameter severity, never the configuration-level one
            severity: if is_compliant { Severity::None } else { check.violation_severity },
            rule_id: check.cis_reference.to_string(),
        });
    }

    Ok(findings)
}

fn check_permissions(config: &Configuration) -> Result<Finding> {
    let field = |name: &str| {
        config.parameter(name).ok_or_else(|| {
            PipelineError::schema(
                format!("configuration {}", config.config_id),
                format!("missing parameter {}", name),
            )
        })
    };

    let path = field(FILE_PARAM)?;
    let actual = field(FILE_PERMISSIONS_PARAM)?;
    let expected = field(EXPECTED_PERMISSIONS_PARAM)?;
    let is_compliant = actual == expected;

    let severity = if is_permissive_mode(actual) {
        Severity::Critical
    } else if !is_compliant {
        Severity::High
    } else {
        Severity::None
    };

    Ok(Finding {
        parameter: path.to_string(),
        expected_value: expected.to_string(),
        actual_value: actual.to_string(),
        is_compliant,
        severity,
        rule_id: permission_reference(path).to_string(),
    })
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Statistics logged by the label stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    pub total: usize,
    pub vulnerable: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    /// Configurations whose own severity differs from their worst finding
    pub disagreements: Vec<String>,
}

pub fn summarize(configs: &[Configuration], records: &[LabeledRecord]) -> LabelSummary {
    let mut by_severity = BTreeMap::new();
    let mut worst: BTreeMap<&str, Severity> = BTreeMap::new();

    for record in records {
        *by_severity.entry(record.severity).or_insert(0) += 1;
        let entry = worst.entry(record.config_id.as_str()).or_insert(Severity::None);
        *entry = (*entry).max(record.severity);
    }

    let disagreements = configs
        .iter()
        .filter(|c| worst.get(c.config_id.as_str()).map_or(false, |w| *w != c.severity))
        .map(|c| c.config_id.clone())
        .collect();

    LabelSummary {
        total: records.len(),
        vulnerable: records.iter().filter(|r| r.is_vulnerable).count(),
        by_severity,
        disagreements,
    }
}
