//! Dataset Splitter
//!
//! Two-phase stratified split on severity: carve out the test set, then split
//! the remainder into train/validation with the adjusted validation fraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PipelineError, Result};
use crate::logic::catalog::Severity;
use crate::logic::features::{FeatureRecord, LayoutInfo};
use super::stratify::stratified_split;
use super::types::{severity_counts, DatasetSplits, Partition, SplitRatios};

fn severity_key(record: &FeatureRecord) -> Severity {
    record.labeled.severity
}

/// Split into train / validation / test
///
/// Every severity class needs at least one member per partition; this is
/// checked on the full input so the error reports the real class size.
pub fn split_dataset(records: Vec<FeatureRecord>, ratios: &SplitRatios, seed: u64) -> Result<DatasetSplits> {
    ratios.validate()?;

    let required = Partition::ALL.len();
    for (severity, count) in severity_counts(&records) {
        if count < required {
            return Err(PipelineError::StratificationInfeasible {
                class: severity.to_string(),
                count,
                required,
            });
        }
    }

    let (train_val, test) = stratified_split(records, ratios.test, severity_key, seed)?;
    let (train, validation) =
        stratified_split(train_val, ratios.adjusted_validation(), severity_key, seed)?;

    Ok(DatasetSplits { train, validation, test })
}

// ============================================================================
// MANIFEST
// ============================================================================

/// Per-partition summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub partition: Partition,
    pub records: usize,
    pub severity: BTreeMap<Severity, usize>,
    /// SHA-256 over the ordered record identities
    pub digest: String,
}

/// Evidence of what the split stage produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitManifest {
    pub seed: u64,
    pub ratios: SplitRatios,
    pub layout: LayoutInfo,
    pub total_records: usize,
    pub partitions: Vec<PartitionSummary>,
}

impl SplitManifest {
    pub fn build(splits: &DatasetSplits, ratios: &SplitRatios, seed: u64) -> Self {
        let partitions = Partition::ALL
            .iter()
            .map(|&partition| {
                let records = splits.get(partition);
                PartitionSummary {
                    partition,
                    records: records.len(),
                    severity: severity_counts(records),
                    digest: identity_digest(records),
                }
            })
            .collect();

        Self {
            seed,
            ratios: *ratios,
            layout: LayoutInfo::current(),
            total_records: splits.total(),
            partitions,
        }
    }
}

/// Hex SHA-256 of `config_id \t parameter \n` for each record, in order
pub fn identity_digest(records: &[FeatureRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        let (config_id, parameter) = record.labeled.identity();
        hasher.update(config_id.as_bytes());
        hasher.update(b"\t");
        hasher.update(parameter.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
