//! Central Configuration Constants
//!
//! Single source of truth for all pipeline defaults.
//! To change where the dataset lands or how it is split, only edit this file.

use std::path::PathBuf;

/// Default working root (the `dataset/` tree is created beneath it)
pub const DEFAULT_DATASET_ROOT: &str = ".";

/// Seed for timestamp synthesis in the generator
pub const DEFAULT_GENERATION_SEED: u64 = 2026;

/// Seed for stratified sampling in the splitter
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Default split proportions
pub const DEFAULT_TRAIN_RATIO: f64 = 0.70;
pub const DEFAULT_VALIDATION_RATIO: f64 = 0.15;
pub const DEFAULT_TEST_RATIO: f64 = 0.15;

/// Simulation window for synthesized timestamps (inclusive day range)
pub const SIMULATION_YEAR: i32 = 2026;
pub const SIMULATION_MONTH: u32 = 2;
pub const SIMULATION_FIRST_DAY: u32 = 1;
pub const SIMULATION_LAST_DAY: u32 = 28;

/// Value used when a configuration does not carry an evaluated parameter
pub const NOT_SET: &str = "NOT_SET";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Hardening Dataset";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the dataset root from environment or use the working directory
pub fn get_dataset_root() -> PathBuf {
    std::env::var("DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_ROOT))
}
