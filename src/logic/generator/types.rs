//! Generator Types
//!
//! Configuration records, parameter names and the simulation window.
//! No generation logic here - only data structures.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{SIMULATION_FIRST_DAY, SIMULATION_LAST_DAY, SIMULATION_MONTH, SIMULATION_YEAR};
use crate::error::{PipelineError, Result};
use crate::logic::catalog::Severity;

// ============================================================================
// PARAMETER NAMES
// ============================================================================

pub const PERMIT_ROOT_LOGIN: &str = "PermitRootLogin";
pub const PASSWORD_AUTHENTICATION: &str = "PasswordAuthentication";
pub const PERMIT_EMPTY_PASSWORDS: &str = "PermitEmptyPasswords";

/// The three authentication-control parameters, in evaluation order
pub const AUTH_PARAMETERS: [&str; 3] = [
    PERMIT_ROOT_LOGIN,
    PASSWORD_AUTHENTICATION,
    PERMIT_EMPTY_PASSWORDS,
];

/// Keys of a file-permission configuration
pub const FILE_PARAM: &str = "file";
pub const FILE_PERMISSIONS_PARAM: &str = "file_permissions";
pub const EXPECTED_PERMISSIONS_PARAM: &str = "expected_permissions";

/// Shadow / credential file
pub const SHADOW_PATH: &str = "/etc/shadow";
pub const PASSWD_PATH: &str = "/etc/passwd";

/// World readable/writable modes
pub const PERMISSIVE_MODES: [&str; 2] = ["777", "666"];

/// Value meaning a switch is turned on
pub const ENABLED: &str = "yes";
pub const DISABLED: &str = "no";

pub fn is_permissive_mode(mode: &str) -> bool {
    PERMISSIVE_MODES.contains(&mode)
}

// ============================================================================
// CATEGORY
// ============================================================================

/// Configuration class; decides which policy and rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// SSH daemon authentication settings (network facing)
    #[serde(rename = "SSH")]
    Ssh,
    /// Permission bits of a sensitive file
    #[serde(rename = "FILE_PERMISSIONS")]
    FilePermissions,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ssh => "SSH",
            Category::FilePermissions => "FILE_PERMISSIONS",
        }
    }

    /// Prefix of sequential configuration ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Category::Ssh => "SSH",
            Category::FilePermissions => "PERM",
        }
    }

    /// Number of labeled records one configuration of this class produces
    pub fn rules_per_config(&self) -> usize {
        match self {
            Category::Ssh => AUTH_PARAMETERS.len(),
            Category::FilePermissions => 1,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration-level pre-classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub severity: Severity,
    pub vulnerabilities: Vec<String>,
}

impl Assessment {
    pub fn secure() -> Self {
        Self {
            severity: Severity::None,
            vulnerabilities: vec![],
        }
    }
}

/// One synthetic system configuration
///
/// Field order is the persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub config_id: String,
    pub category: Category,
    pub parameters: BTreeMap<String, String>,
    pub timestamp: NaiveDate,
    pub vulnerabilities: Vec<String>,
    pub severity: Severity,
    pub is_vulnerable: bool,
}

impl Configuration {
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

// ============================================================================
// SIMULATION WINDOW
// ============================================================================

/// Inclusive day range timestamps are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationWindow {
    pub year: i32,
    pub month: u32,
    pub first_day: u32,
    pub last_day: u32,
}

impl Default for SimulationWindow {
    fn default() -> Self {
        Self {
            year: SIMULATION_YEAR,
            month: SIMULATION_MONTH,
            first_day: SIMULATION_FIRST_DAY,
            last_day: SIMULATION_LAST_DAY,
        }
    }
}

impl SimulationWindow {
    /// First day of the window and the number of days it spans
    pub fn bounds(&self) -> Result<(NaiveDate, u32)> {
        let start = NaiveDate::from_ymd_opt(self.year, self.month, self.first_day);
        let end = NaiveDate::from_ymd_opt(self.year, self.month, self.last_day);
        match (start, end) {
            (Some(start), Some(_)) if self.first_day <= self.last_day => {
                Ok((start, self.last_day - self.first_day + 1))
            }
            _ => Err(PipelineError::InvalidConfig(format!(
                "simulation window {}-{:02} days {}..={} is not a valid date range",
                self.year, self.month, self.first_day, self.last_day
            ))),
        }
    }
}
