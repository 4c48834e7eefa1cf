//! Pipeline Module - Stage Orchestration
//!
//! Five stages, each reading its predecessor's persisted artifact and writing
//! its own. Stages can run one at a time (CLI subcommands) or in sequence
//! with `run_all`, which stops at the first failure.

pub mod stages;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::{PipelineError, Result};
use crate::logic::config::PipelineConfig;
use crate::logic::dataset::DatasetLayout;
use crate::logic::split::Partition;

pub use stages::{extract_rules, features, generate, label, split};

// ============================================================================
// STAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExtractRules,
    Generate,
    Label,
    Features,
    Split,
}

impl Stage {
    /// Execution order
    pub const ALL: [Stage; 5] = [
        Stage::ExtractRules,
        Stage::Generate,
        Stage::Label,
        Stage::Features,
        Stage::Split,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ExtractRules => "extract-rules",
            Stage::Generate => "generate",
            Stage::Label => "label",
            Stage::Features => "features",
            Stage::Split => "split",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::ExtractRules => "Phase 1: Extract CIS benchmark rules",
            Stage::Generate => "Phase 2: Generate configuration space",
            Stage::Label => "Phase 3: Label configurations",
            Stage::Features => "Phase 4: Extract features",
            Stage::Split => "Phase 5: Stratified train/validation/test split",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error tagged with the stage that raised it
#[derive(Error, Debug)]
#[error("stage {stage} failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: PipelineError,
}

// ============================================================================
// RUNNER
// ============================================================================

/// Run one stage against the artifacts under `layout`
pub fn run_stage(stage: Stage, layout: &DatasetLayout, config: &PipelineConfig) -> Result<()> {
    log::info!("{}", "=".repeat(60));
    log::info!("{}", stage.description());
    log::info!("{}", "=".repeat(60));

    match stage {
        Stage::ExtractRules => extract_rules(layout).map(|_| ()),
        Stage::Generate => generate(layout, config).map(|_| ()),
        Stage::Label => label(layout).map(|_| ()),
        Stage::Features => features(layout).map(|_| ()),
        Stage::Split => split(layout, config).map(|_| ()),
    }
}

/// Same as `run_stage`, with the error tagged by stage
pub fn run_labeled(
    stage: Stage,
    layout: &DatasetLayout,
    config: &PipelineConfig,
) -> std::result::Result<(), StageFailure> {
    run_stage(stage, layout, config).map_err(|source| StageFailure { stage, source })
}

/// Run every stage in order and return the split files with their byte sizes
pub fn run_all(
    layout: &DatasetLayout,
    config: &PipelineConfig,
) -> std::result::Result<Vec<(PathBuf, u64)>, StageFailure> {
    for stage in Stage::ALL {
        run_labeled(stage, layout, config)?;
    }

    let mut produced = Vec::with_capacity(Partition::ALL.len());
    for partition in Partition::ALL {
        let path = layout.split(partition);
        let size = fs::metadata(&path)
            .map_err(|e| StageFailure {
                stage: Stage::Split,
                source: PipelineError::io(&path, e),
            })?
            .len();
        log::info!("  {} ({} bytes)", path.display(), size);
        produced.push((path, size));
    }

    log::info!("Pipeline complete: {} split files under {}", produced.len(), layout.final_dir().display());
    Ok(produced)
}
