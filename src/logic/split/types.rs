//! Split Types
//!
//! Ratios, partition tags and the split result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TEST_RATIO, DEFAULT_TRAIN_RATIO, DEFAULT_VALIDATION_RATIO};
use crate::error::{PipelineError, Result};
use crate::logic::catalog::Severity;
use crate::logic::features::FeatureRecord;

const RATIO_TOLERANCE: f64 = 1e-6;

// ============================================================================
// RATIOS
// ============================================================================

/// Target proportions of the three partitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitRatios {
    pub train: f64,
    pub validation: f64,
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: DEFAULT_TRAIN_RATIO,
            validation: DEFAULT_VALIDATION_RATIO,
            test: DEFAULT_TEST_RATIO,
        }
    }
}

impl SplitRatios {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("train", self.train), ("validation", self.validation), ("test", self.test)] {
            if !(value > 0.0 && value < 1.0) {
                return Err(PipelineError::InvalidConfig(format!(
                    "{} ratio must be in (0, 1), got {}",
                    name, value
                )));
            }
        }

        let sum = self.train + self.validation + self.test;
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(PipelineError::InvalidConfig(format!(
                "split ratios must sum to 1.0, got {:.6}",
                sum
            )));
        }
        Ok(())
    }

    /// Validation share of what is left once the test set is carved out
    pub fn adjusted_validation(&self) -> f64 {
        self.validation / (self.train + self.validation)
    }
}

// ============================================================================
// PARTITIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Validation,
    Test,
}

impl Partition {
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Validation, Partition::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Validation => "validation",
            Partition::Test => "test",
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three disjoint record sets whose union is the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSplits {
    pub train: Vec<FeatureRecord>,
    pub validation: Vec<FeatureRecord>,
    pub test: Vec<FeatureRecord>,
}

impl DatasetSplits {
    pub fn get(&self, partition: Partition) -> &[FeatureRecord] {
        match partition {
            Partition::Train => &self.train,
            Partition::Validation => &self.validation,
            Partition::Test => &self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }

    /// Partition tag of every record identity
    #[cfg(test)]
    pub fn assignments(&self) -> BTreeMap<(String, String), Partition> {
        let mut map = BTreeMap::new();
        for partition in Partition::ALL {
            for record in self.get(partition) {
                let (config_id, parameter) = record.labeled.identity();
                map.insert((config_id.to_string(), parameter.to_string()), partition);
            }
        }
        map
    }
}

// ============================================================================
// DISTRIBUTION
// ============================================================================

pub fn severity_counts(records: &[FeatureRecord]) -> BTreeMap<Severity, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.labeled.severity).or_insert(0) += 1;
    }
    counts
}

/// Fraction of each severity class; empty input yields an empty map
pub fn class_fractions(records: &[FeatureRecord]) -> BTreeMap<Severity, f64> {
    let total = records.len() as f64;
    severity_counts(records)
        .into_iter()
        .map(|(severity, count)| (severity, count as f64 / total))
        .collect()
}

/// Largest absolute class-fraction difference between a subset and the whole
#[cfg(test)]
pub fn max_class_deviation(full: &[FeatureRecord], subset: &[FeatureRecord]) -> f64 {
    let full_fractions = class_fractions(full);
    let subset_fractions = class_fractions(subset);

    full_fractions
        .iter()
        .map(|(severity, expected)| {
            let actual = subset_fractions.get(severity).copied().unwrap_or(0.0);
            (actual - expected).abs()
        })
        .fold(0.0, f64::max)
}
