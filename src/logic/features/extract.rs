//! Feature Extraction
//!
//! Pure mapping LabeledRecord → five 0/1 indicators. Every feature is
//! re-derivable from the record's own fields; nothing else is consulted.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::logic::evaluator::LabeledRecord;
use crate::logic::generator::{
    Category, AUTH_PARAMETERS, ENABLED, PASSWORD_AUTHENTICATION, PERMIT_EMPTY_PASSWORDS,
    PERMIT_ROOT_LOGIN, SHADOW_PATH,
};
use super::layout::FEATURE_COUNT;

// ============================================================================
// EXTRACTORS
// ============================================================================

type Extractor = fn(&LabeledRecord) -> bool;

fn network_exposed(r: &LabeledRecord) -> bool {
    r.category == Category::Ssh
}

fn affects_auth(r: &LabeledRecord) -> bool {
    AUTH_PARAMETERS.contains(&r.parameter.as_str())
}

fn critical_file(r: &LabeledRecord) -> bool {
    r.parameter == SHADOW_PATH
}

fn root_access(r: &LabeledRecord) -> bool {
    r.parameter == PERMIT_ROOT_LOGIN && r.actual_value == ENABLED
}

fn weak_auth(r: &LabeledRecord) -> bool {
    (r.parameter == PASSWORD_AUTHENTICATION || r.parameter == PERMIT_EMPTY_PASSWORDS)
        && r.actual_value == ENABLED
}

/// Extractors in layout order
pub const EXTRACTORS: [(&str, Extractor); FEATURE_COUNT] = [
    ("feature_network_exposed", network_exposed),
    ("feature_affects_auth", affects_auth),
    ("feature_critical_file", critical_file),
    ("feature_root_access", root_access),
    ("feature_weak_auth", weak_auth),
];

/// Feature vector for a record, in layout order
pub fn extract(record: &LabeledRecord) -> [u8; FEATURE_COUNT] {
    let mut values = [0u8; FEATURE_COUNT];
    for (slot, (_, extractor)) in values.iter_mut().zip(EXTRACTORS.iter()) {
        *slot = u8::from(extractor(record));
    }
    values
}

// ============================================================================
// FEATURE RECORD
// ============================================================================

/// Labeled record plus its features; the labeled columns come first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(flatten)]
    pub labeled: LabeledRecord,
    pub feature_network_exposed: u8,
    pub feature_affects_auth: u8,
    pub feature_critical_file: u8,
    pub feature_root_access: u8,
    pub feature_weak_auth: u8,
}

impl FeatureRecord {
    pub fn from_labeled(labeled: LabeledRecord) -> Self {
        let [network_exposed, affects_auth, critical_file, root_access, weak_auth] = extract(&labeled);
        Self {
            labeled,
            feature_network_exposed: network_exposed,
            feature_affects_auth: affects_auth,
            feature_critical_file: critical_file,
            feature_root_access: root_access,
            feature_weak_auth: weak_auth,
        }
    }

    /// Stored feature values, in layout order
    pub fn vector(&self) -> [u8; FEATURE_COUNT] {
        [
            self.feature_network_exposed,
            self.feature_affects_auth,
            self.feature_critical_file,
            self.feature_root_access,
            self.feature_weak_auth,
        ]
    }

    /// Stored features equal a fresh extraction from the labeled fields
    pub fn is_pure(&self) -> bool {
        self.vector() == extract(&self.labeled)
    }
}

/// Augment every record; the input collection is left untouched
pub fn augment_all(records: &[LabeledRecord]) -> Vec<FeatureRecord> {
    records
        .iter()
        .cloned()
        .map(FeatureRecord::from_labeled)
        .collect()
}

/// Recompute features and fail on the first record whose stored values differ
/// or are not 0/1
pub fn verify_features(records: &[FeatureRecord], location: &str) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if record.vector().iter().any(|v| *v > 1) {
            return Err(PipelineError::schema(
                format!("{} record {}", location, index + 1),
                "feature values must be 0 or 1",
            ));
        }
        if !record.is_pure() {
            let (config_id, parameter) = record.labeled.identity();
            return Err(PipelineError::schema(
                format!("{} record {}", location, index + 1),
                format!(
                    "features of {}/{} do not match their labeled fields: stored {:?}, derived {:?}",
                    config_id,
                    parameter,
                    record.vector(),
                    extract(&record.labeled)
                ),
            ));
        }
    }
    Ok(())
}
