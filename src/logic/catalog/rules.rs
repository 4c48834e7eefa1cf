//! Built-in CIS Rule Table
//!
//! Rules transcribed from the CIS benchmark document. This is the reference
//! table the extract stage persists; every later stage reads the persisted copy.

use super::types::{Rule, Severity};

/// Catalog category for SSH daemon rules
pub const SSH_CATEGORY: &str = "SSH";

/// Catalog category for file permission rules
pub const FILE_PERM_CATEGORY: &str = "FILE_PERM";

struct RuleRow {
    rule_id: &'static str,
    category: &'static str,
    severity: Severity,
    title: &'static str,
    parameter: &'static str,
    expected_value: &'static str,
    check_command: &'static str,
    remediation: &'static str,
}

const CIS_RULES: &[RuleRow] = &[
    RuleRow {
        rule_id: "CIS-5.2.1",
        category: SSH_CATEGORY,
        severity: Severity::High,
        title: "Ensure permissions on /etc/ssh/sshd_config are configured",
        parameter: "file_permissions",
        expected_value: "600",
        check_command: "stat /etc/ssh/sshd_config",
        remediation: "chown root:root /etc/ssh/sshd_config && chmod 600 /etc/ssh/sshd_config",
    },
    RuleRow {
        rule_id: "CIS-5.2.4",
        category: SSH_CATEGORY,
        severity: Severity::High,
        title: "Ensure SSH Protocol is set to 2",
        parameter: "Protocol",
        expected_value: "2",
        check_command: "grep \"^Protocol\" /etc/ssh/sshd_config",
        remediation: "Edit /etc/ssh/sshd_config and set Protocol 2",
    },
    RuleRow {
        rule_id: "CIS-5.2.8",
        category: SSH_CATEGORY,
        severity: Severity::Critical,
        title: "Ensure SSH root login is disabled",
        parameter: "PermitRootLogin",
        expected_value: "no",
        check_command: "grep \"^PermitRootLogin\" /etc/ssh/sshd_config",
        remediation: "Edit /etc/ssh/sshd_config and set PermitRootLogin no",
    },
    RuleRow {
        rule_id: "CIS-5.2.9",
        category: SSH_CATEGORY,
        severity: Severity::Critical,
        title: "Ensure SSH PermitEmptyPasswords is disabled",
        parameter: "PermitEmptyPasswords",
        expected_value: "no",
        check_command: "grep \"^PermitEmptyPasswords\" /etc/ssh/sshd_config",
        remediation: "Edit /etc/ssh/sshd_config and set PermitEmptyPasswords no",
    },
    RuleRow {
        rule_id: "CIS-5.2.10",
        category: SSH_CATEGORY,
        severity: Severity::High,
        title: "Ensure SSH PasswordAuthentication is disabled",
        parameter: "PasswordAuthentication",
        expected_value: "no",
        check_command: "grep \"^PasswordAuthentication\" /etc/ssh/sshd_config",
        remediation: "Edit /etc/ssh/sshd_config and set PasswordAuthentication no",
    },
    RuleRow {
        rule_id: "CIS-6.1.2",
        category: FILE_PERM_CATEGORY,
        severity: Severity::High,
        title: "Ensure permissions on /etc/passwd are configured",
        parameter: "file_permissions",
        expected_value: "644",
        check_command: "stat /etc/passwd",
        remediation: "chmod 644 /etc/passwd",
    },
    RuleRow {
        rule_id: "CIS-6.1.3",
        category: FILE_PERM_CATEGORY,
        severity: Severity::Critical,
        title: "Ensure permissions on /etc/shadow are configured",
        parameter: "file_permissions",
        expected_value: "640",
        check_command: "stat /etc/shadow",
        remediation: "chmod 640 /etc/shadow",
    },
];

/// Materialize the built-in table as owned rules, in table order
pub fn builtin_rules() -> Vec<Rule> {
    CIS_RULES
        .iter()
        .map(|row| Rule {
            rule_id: row.rule_id.to_string(),
            category: row.category.to_string(),
            severity: row.severity,
            title: row.title.to_string(),
            parameter: row.parameter.to_string(),
            expected_value: row.expected_value.to_string(),
            check_command: row.check_command.to_string(),
            remediation: row.remediation.to_string(),
        })
        .collect()
}
