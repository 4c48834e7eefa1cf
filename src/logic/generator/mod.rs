//! Generator Module - Synthetic Configuration Space
//!
//! Expands parameter domains into configurations and pre-classifies each one.
//!
//! ## Structure
//! - `types`: Configuration, Category, parameter names, simulation window
//! - `product`: Cartesian product over named domains
//! - `policy`: Configuration-level severity policies
//! - `engine`: Seeded generator with per-category id sequences

pub mod types;
pub mod product;
pub mod policy;
pub mod engine;


pub use types::{
    is_permissive_mode, Category, Configuration, SimulationWindow, AUTH_PARAMETERS, ENABLED,
    EXPECTED_PERMISSIONS_PARAM, FILE_PARAM, FILE_PERMISSIONS_PARAM, PASSWORD_AUTHENTICATION,
    PERMIT_EMPTY_PASSWORDS, PERMIT_ROOT_LOGIN, SHADOW_PATH,
};
pub use engine::{default_permission_targets, default_ssh_domains, generate_all, GeneratedConfigs};
