//! Catalog Types
//!
//! Core types for hardening rules and severity.
//! No evaluation logic here - only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordinal risk classification of a finding or configuration
///
/// Ordering follows risk: `None < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Compliant, nothing to report
    None,
    /// Misconfiguration that weakens hardening
    High,
    /// Directly exploitable misconfiguration
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A single CIS hardening rule, one row of the catalog table
///
/// Field order is the persisted column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    pub category: String,
    /// Default severity assigned by the benchmark
    pub severity: Severity,
    pub title: String,
    pub parameter: String,
    pub expected_value: String,
    pub check_command: String,
    pub remediation: String,
}

impl Rule {
    pub fn matches(&self, category: &str, parameter: &str) -> bool {
        self.category == category && self.parameter == parameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!([Severity::High, Severity::Critical, Severity::None].iter().max(), Some(&Severity::Critical));
    }

    #[test]
    fn test_severity_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Severity::None).unwrap(), "\"NONE\"");
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"CRITICAL\"");
        let parsed: Severity = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, Severity::High);
    }

    #[test]
    fn test_unknown_severity_rejected() {
        assert!(serde_json::from_str::<Severity>("\"MEDIUM\"").is_err());
    }
}
