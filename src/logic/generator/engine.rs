//! Configuration Generator
//!
//! Expands parameter domains into configurations with sequential ids,
//! seeded timestamps and a configuration-level assessment.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use super::policy::{assess_authentication, assess_permissions};
use super::product::{CartesianProduct, ParameterDomain};
use super::types::{
    Assessment, Category, Configuration, SimulationWindow, DISABLED, ENABLED,
    EXPECTED_PERMISSIONS_PARAM, FILE_PARAM, FILE_PERMISSIONS_PARAM, PASSWD_PATH,
    PASSWORD_AUTHENTICATION, PERMIT_EMPTY_PASSWORDS, PERMIT_ROOT_LOGIN, SHADOW_PATH,
};

// ============================================================================
// DOMAINS
// ============================================================================

/// A sensitive file, its hardened mode and the modes to synthesize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTarget {
    pub path: String,
    pub expected: String,
    pub observed: Vec<String>,
}

impl PermissionTarget {
    pub fn new(path: &str, expected: &str, observed: &[&str]) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.to_string(),
            observed: observed.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn domains(&self) -> Vec<ParameterDomain> {
        vec![
            ParameterDomain::fixed(FILE_PARAM, &self.path),
            ParameterDomain {
                name: FILE_PERMISSIONS_PARAM.to_string(),
                values: self.observed.clone(),
            },
            ParameterDomain::fixed(EXPECTED_PERMISSIONS_PARAM, &self.expected),
        ]
    }
}

/// SSH authentication switches, each on or off
pub fn default_ssh_domains() -> Vec<ParameterDomain> {
    [PERMIT_ROOT_LOGIN, PASSWORD_AUTHENTICATION, PERMIT_EMPTY_PASSWORDS]
        .iter()
        .map(|name| ParameterDomain::new(name, &[ENABLED, DISABLED]))
        .collect()
}

pub fn default_permission_targets() -> Vec<PermissionTarget> {
    vec![
        PermissionTarget::new(PASSWD_PATH, "644", &["644", "666", "777"]),
        PermissionTarget::new(SHADOW_PATH, "640", &["640", "644", "777"]),
    ]
}

// ============================================================================
// GENERATOR
// ============================================================================

/// Seeded configuration generator
///
/// Ids are assigned per category in iteration order, so the output is a pure
/// function of (seed, window, domains, call order).
pub struct ConfigurationGenerator {
    rng: StdRng,
    window_start: NaiveDate,
    window_days: u32,
    next_ids: BTreeMap<Category, u32>,
}

impl ConfigurationGenerator {
    pub fn new(seed: u64, window: SimulationWindow) -> Result<Self> {
        let (window_start, window_days) = window.bounds()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            window_start,
            window_days,
            next_ids: BTreeMap::new(),
        })
    }

    /// Expand the Cartesian product of `domains` into configurations
    pub fn expand<F>(
        &mut self,
        category: Category,
        domains: &[ParameterDomain],
        assess: F,
    ) -> Result<Vec<Configuration>>
    where
        F: Fn(&BTreeMap<String, String>) -> Assessment,
    {
        let mut names = HashSet::new();
        for domain in domains {
            if !names.insert(domain.name.as_str()) {
                return Err(PipelineError::InvalidConfig(format!(
                    "parameter domain {} declared twice",
                    domain.name
                )));
            }
        }

        let product = CartesianProduct::new(domains);
        let mut configs = Vec::with_capacity(product.total());

        for combination in product {
            let parameters: BTreeMap<String, String> = combination
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();

            let assessment = assess(&parameters);
            let config = Configuration {
                config_id: self.next_id(category),
                category,
                parameters,
                timestamp: self.draw_timestamp(),
                is_vulnerable: !assessment.vulnerabilities.is_empty(),
                vulnerabilities: assessment.vulnerabilities,
                severity: assessment.severity,
            };
            configs.push(config);
        }

        Ok(configs)
    }

    pub fn ssh_configs(&mut self, domains: &[ParameterDomain]) -> Result<Vec<Configuration>> {
        self.expand(Category::Ssh, domains, assess_authentication)
    }

    /// One id sequence across all targets
    pub fn permission_configs(&mut self, targets: &[PermissionTarget]) -> Result<Vec<Configuration>> {
        let mut configs = Vec::new();
        for target in targets {
            configs.extend(self.expand(
                Category::FilePermissions,
                &target.domains(),
                assess_permissions,
            )?);
        }
        Ok(configs)
    }

    fn next_id(&mut self, category: Category) -> String {
        let counter = self.next_ids.entry(category).or_insert(0);
        *counter += 1;
        format!("{}-{:04}", category.id_prefix(), counter)
    }

    fn draw_timestamp(&mut self) -> NaiveDate {
        let offset = self.rng.gen_range(0..self.window_days);
        self.window_start + Duration::days(i64::from(offset))
    }
}

// ============================================================================
// BATCH
// ============================================================================

/// Everything the generate stage produces
#[derive(Debug, Clone)]
pub struct GeneratedConfigs {
    pub ssh: Vec<Configuration>,
    pub permissions: Vec<Configuration>,
}

impl GeneratedConfigs {
    pub fn total(&self) -> usize {
        self.ssh.len() + self.permissions.len()
    }

    pub fn vulnerable(&self) -> usize {
        self.ssh
            .iter()
            .chain(&self.permissions)
            .filter(|c| c.is_vulnerable)
            .count()
    }
}

/// Generate both configuration families from one seeded generator
pub fn generate_all(
    seed: u64,
    window: SimulationWindow,
    ssh_domains: &[ParameterDomain],
    targets: &[PermissionTarget],
) -> Result<GeneratedConfigs> {
    let mut generator = ConfigurationGenerator::new(seed, window)?;
    let ssh = generator.ssh_configs(ssh_domains)?;
    let permissions = generator.permission_configs(targets)?;
    Ok(GeneratedConfigs { ssh, permissions })
}
