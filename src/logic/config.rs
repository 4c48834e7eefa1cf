//! Pipeline Configuration
//!
//! Seeds, split ratios and the simulation window.
//! Defaults come from `constants`; a JSON file may override any subset of
//! fields, and CLI flags override the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GENERATION_SEED, DEFAULT_SPLIT_SEED};
use crate::error::Result;
use crate::logic::dataset::read_json;
use crate::logic::generator::SimulationWindow;
use crate::logic::split::SplitRatios;

// ============================================================================
// PIPELINE CONFIG
// ============================================================================

/// Pipeline configuration (can be loaded from config file)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seeds timestamp synthesis
    pub generation_seed: u64,
    /// Seeds both stratified sampling phases
    pub split_seed: u64,
    pub ratios: SplitRatios,
    pub window: SimulationWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generation_seed: DEFAULT_GENERATION_SEED,
            split_seed: DEFAULT_SPLIT_SEED,
            ratios: SplitRatios::default(),
            window: SimulationWindow::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = read_json(path)?;
        config.validate()?;
        log::debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.ratios.validate()?;
        self.window.bounds()?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.generation_seed, 2026);
        assert_eq!(config.split_seed, 42);
        assert_eq!(config.ratios.train, 0.70);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(&path, r#"{ "split_seed": 7 }"#).unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.split_seed, 7);
        assert_eq!(config.generation_seed, 2026);
        assert_eq!(config.ratios, SplitRatios::default());
        assert_eq!(config.window, SimulationWindow::default());
    }

    #[test]
    fn test_partial_ratios_keep_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(
            &path,
            r#"{ "ratios": { "train": 0.6, "test": 0.25 } }"#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.ratios.train, 0.6);
        assert_eq!(config.ratios.validation, 0.15);
        assert_eq!(config.ratios.test, 0.25);
    }

    #[test]
    fn test_file_with_bad_ratios_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(
            &path,
            r#"{ "ratios": { "train": 0.5, "validation": 0.1, "test": 0.1 } }"#,
        )
        .unwrap();

        assert!(matches!(
            PipelineConfig::load(&path),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            PipelineConfig::load(&dir.path().join("absent.json")),
            Err(PipelineError::MissingInput { .. })
        ));
    }
}
