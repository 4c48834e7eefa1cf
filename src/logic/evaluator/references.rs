//! Fixed Severity and Reference Tables
//!
//! Per-parameter severities and CIS references used when labeling.
//! These are fixed mappings, NOT joins against the rule catalog: a catalog
//! that renames or adds rules does not change `cis_reference`.

use crate::logic::catalog::Severity;
use crate::logic::generator::{PASSWORD_AUTHENTICATION, PERMIT_EMPTY_PASSWORDS, PERMIT_ROOT_LOGIN};

/// Authentication check: parameter, violation severity, reference
pub struct AuthCheck {
    pub parameter: &'static str,
    pub violation_severity: Severity,
    pub cis_reference: &'static str,
}

/// Checked in this order for every SSH configuration
pub const AUTH_CHECKS: [AuthCheck; 3] = [
    AuthCheck {
        parameter: PERMIT_ROOT_LOGIN,
        violation_severity: Severity::Critical,
        cis_reference: "CIS-5.2.8",
    },
    AuthCheck {
        parameter: PASSWORD_AUTHENTICATION,
        violation_severity: Severity::High,
        cis_reference: "CIS-5.2.10",
    },
    AuthCheck {
        parameter: PERMIT_EMPTY_PASSWORDS,
        violation_severity: Severity::Critical,
        cis_reference: "CIS-5.2.9",
    },
];

pub const PASSWD_REFERENCE: &str = "CIS-6.1.2";
pub const SHADOW_REFERENCE: &str = "CIS-6.1.3";

/// Reference for a file path: anything that is not a passwd file maps to
/// the shadow rule
pub fn permission_reference(path: &str) -> &'static str {
    if path.contains("passwd") {
        PASSWD_REFERENCE
    } else {
        SHADOW_REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_reference() {
        assert_eq!(permission_reference("/etc/passwd"), "CIS-6.1.2");
        assert_eq!(permission_reference("/etc/shadow"), "CIS-6.1.3");
        // Unknown paths fall through to the shadow rule
        assert_eq!(permission_reference("/etc/gshadow"), "CIS-6.1.3");
        assert_eq!(permission_reference("/etc/group"), "CIS-6.1.3");
    }

    #[test]
    fn test_auth_checks_match_builtin_catalog() {
        let catalog = crate::logic::catalog::RuleCatalog::builtin();
        for check in &AUTH_CHECKS {
            let rule = catalog.get(check.cis_reference).unwrap();
            assert_eq!(rule.parameter, check.parameter);
            assert_eq!(rule.severity, check.violation_severity);
        }
    }
}
