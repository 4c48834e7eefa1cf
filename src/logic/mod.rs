//! Logic Module - Dataset Pipeline Engines
//!
//! ## Architecture
//! - `catalog/` - CIS rule registry
//! - `generator/` - Configuration space synthesis
//! - `evaluator/` - Compliance labeling
//! - `features/` - Feature extraction (versioned layout)
//! - `split/` - Stratified partitioning
//! - `dataset/` - Artifact paths and JSON / JSONL storage
//! - `pipeline/` - Stage orchestration

pub mod config;

// Stage engines
pub mod catalog;
pub mod generator;
pub mod evaluator;
pub mod features;
pub mod split;

// Storage & orchestration
pub mod dataset;
pub mod pipeline;
