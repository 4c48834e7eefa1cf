//! Configuration-Level Severity Policies
//!
//! Pre-classification of a whole configuration, computed at generation time.
//! This is independent of the per-rule severity the evaluator assigns; the two
//! may disagree and both are kept.

use std::collections::BTreeMap;

use crate::logic::catalog::Severity;
use super::types::{
    is_permissive_mode, Assessment, ENABLED, EXPECTED_PERMISSIONS_PARAM, FILE_PERMISSIONS_PARAM,
    PASSWORD_AUTHENTICATION, PERMIT_EMPTY_PASSWORDS, PERMIT_ROOT_LOGIN,
};

pub const ROOT_LOGIN_ENABLED: &str = "Root login enabled";
pub const PASSWORD_AUTH_FOR_ROOT: &str = "Password auth for root";
pub const EMPTY_PASSWORDS_ALLOWED: &str = "Empty passwords allowed";
pub const WORLD_READABLE_WRITABLE: &str = "World readable/writable";
pub const INCORRECT_PERMISSIONS: &str = "Incorrect permissions";

fn enabled(parameters: &BTreeMap<String, String>, name: &str) -> bool {
    parameters.get(name).map_or(false, |v| v == ENABLED)
}

/// Authentication policy: every trigger is CRITICAL
pub fn assess_authentication(parameters: &BTreeMap<String, String>) -> Assessment {
    let root = enabled(parameters, PERMIT_ROOT_LOGIN);
    let password = enabled(parameters, PASSWORD_AUTHENTICATION);
    let empty = enabled(parameters, PERMIT_EMPTY_PASSWORDS);

    let mut assessment = Assessment::secure();

    if root {
        assessment.vulnerabilities.push(ROOT_LOGIN_ENABLED.to_string());
        assessment.severity = Severity::Critical;
    }
    if root && password {
        assessment.vulnerabilities.push(PASSWORD_AUTH_FOR_ROOT.to_string());
        assessment.severity = Severity::Critical;
    }
    if empty {
        assessment.vulnerabilities.push(EMPTY_PASSWORDS_ALLOWED.to_string());
        assessment.severity = Severity::Critical;
    }

    assessment
}

/// File-permission policy: permissive modes are CRITICAL, other drift HIGH
pub fn assess_permissions(parameters: &BTreeMap<String, String>) -> Assessment {
    let observed = parameters.get(FILE_PERMISSIONS_PARAM).map(String::as_str);
    let expected = parameters.get(EXPECTED_PERMISSIONS_PARAM).map(String::as_str);

    match observed {
        Some(mode) if is_permissive_mode(mode) => Assessment {
            severity: Severity::Critical,
            vulnerabilities: vec![WORLD_READABLE_WRITABLE.to_string()],
        },
        _ if observed != expected => Assessment {
            severity: Severity::High,
            vulnerabilities: vec![INCORRECT_PERMISSIONS.to_string()],
        },
        _ => Assessment::secure(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_root_login_only_is_critical() {
        let result = assess_authentication(&params(&[
            (PERMIT_ROOT_LOGIN, "yes"),
            (PASSWORD_AUTHENTICATION, "no"),
            (PERMIT_EMPTY_PASSWORDS, "no"),
        ]));
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.vulnerabilities, vec![ROOT_LOGIN_ENABLED.to_string()]);
    }

    #[test]
    fn test_hardened_auth_is_secure() {
        let result = assess_authentication(&params(&[
            (PERMIT_ROOT_LOGIN, "no"),
            (PASSWORD_AUTHENTICATION, "no"),
            (PERMIT_EMPTY_PASSWORDS, "no"),
        ]));
        assert_eq!(result, Assessment::secure());
    }

    #[test]
    fn test_password_auth_alone_is_not_flagged() {
        // Only password auth *for root* counts at configuration level
        let result = assess_authentication(&params(&[
            (PERMIT_ROOT_LOGIN, "no"),
            (PASSWORD_AUTHENTICATION, "yes"),
            (PERMIT_EMPTY_PASSWORDS, "no"),
        ]));
        assert_eq!(result.severity, Severity::None);
        assert!(result.vulnerabilities.is_empty());
    }

    #[test]
    fn test_all_triggers_in_order() {
        let result = assess_authentication(&params(&[
            (PERMIT_ROOT_LOGIN, "yes"),
            (PASSWORD_AUTHENTICATION, "yes"),
            (PERMIT_EMPTY_PASSWORDS, "yes"),
        ]));
        assert_eq!(
            result.vulnerabilities,
            vec![ROOT_LOGIN_ENABLED, PASSWORD_AUTH_FOR_ROOT, EMPTY_PASSWORDS_ALLOWED]
        );
    }

    #[test]
    fn test_permission_policy() {
        let critical = assess_permissions(&params(&[
            (FILE_PERMISSIONS_PARAM, "666"),
            (EXPECTED_PERMISSIONS_PARAM, "644"),
        ]));
        assert_eq!(critical.severity, Severity::Critical);
        assert_eq!(critical.vulnerabilities, vec![WORLD_READABLE_WRITABLE.to_string()]);

        let high = assess_permissions(&params(&[
            (FILE_PERMISSIONS_PARAM, "644"),
            (EXPECTED_PERMISSIONS_PARAM, "640"),
        ]));
        assert_eq!(high.severity, Severity::High);

        let none = assess_permissions(&params(&[
            (FILE_PERMISSIONS_PARAM, "640"),
            (EXPECTED_PERMISSIONS_PARAM, "640"),
        ]));
        assert_eq!(none, Assessment::secure());
    }
}
