//! Split Module
//!
//! Stratified train / validation / test partitioning.
//!
//! ## Structure
//! - `types`: SplitRatios, Partition, DatasetSplits, distribution helpers
//! - `stratify`: Reusable two-way stratified split
//! - `engine`: Two-phase dataset split and split manifest

pub mod types;
pub mod stratify;
pub mod engine;


pub use types::{class_fractions, DatasetSplits, Partition, SplitRatios};
pub use engine::{split_dataset, SplitManifest};
