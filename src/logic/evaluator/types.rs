//! Evaluator Types
//!
//! Findings and the flat labeled record they fold into.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::logic::catalog::Severity;
use crate::logic::generator::{Category, Configuration};

/// Outcome of checking one configuration against one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub parameter: String,
    pub expected_value: String,
    pub actual_value: String,
    pub is_compliant: bool,
    pub severity: Severity,
    pub rule_id: String,
}

/// One row of the labeled dataset
///
/// Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub config_id: String,
    pub category: Category,
    pub parameter: String,
    pub expected_value: String,
    pub actual_value: String,
    pub is_compliant: bool,
    pub is_vulnerable: bool,
    pub severity: Severity,
    pub cis_reference: String,
    pub timestamp: NaiveDate,
}

impl LabeledRecord {
    pub fn from_finding(config: &Configuration, finding: Finding) -> Self {
        Self {
            config_id: config.config_id.clone(),
            category: config.category,
            parameter: finding.parameter,
            expected_value: finding.expected_value,
            actual_value: finding.actual_value,
            is_compliant: finding.is_compliant,
            is_vulnerable: !finding.is_compliant,
            severity: finding.severity,
            cis_reference: finding.rule_id,
            timestamp: config.timestamp,
        }
    }

    /// Identity of a record across every later table
    pub fn identity(&self) -> (&str, &str) {
        (&self.config_id, &self.parameter)
    }

    /// Label invariants: vulnerable is the negation of compliant, and only
    /// compliant records carry NONE
    pub fn is_consistent(&self) -> bool {
        self.is_vulnerable == !self.is_compliant
            && self.is_compliant == (self.actual_value == self.expected_value)
            && (self.severity == Severity::None) == self.is_compliant
    }
}
