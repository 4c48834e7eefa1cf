//! Dataset Module - Artifact Storage
//!
//! Where every stage reads and writes its artifacts, plus the JSON / JSONL
//! codecs. Tables are JSON Lines with keys in schema order; configuration
//! sets are pretty JSON arrays.

pub mod reader;
pub mod writer;


use std::path::{Path, PathBuf};

use crate::logic::split::Partition;

pub use reader::{read_json, read_jsonl};
pub use writer::{write_json, write_jsonl, StagedWrites};

/// Artifact paths under one working root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.root.join("dataset")
    }

    pub fn catalog(&self) -> PathBuf {
        self.dataset_dir()
            .join("external")
            .join("cleaned")
            .join("cis_benchmark_rules.jsonl")
    }

    pub fn ssh_configs(&self) -> PathBuf {
        self.dataset_dir().join("generated").join("ssh_configs.json")
    }

    pub fn permission_configs(&self) -> PathBuf {
        self.dataset_dir()
            .join("generated")
            .join("file_permission_configs.json")
    }

    pub fn labeled(&self) -> PathBuf {
        self.dataset_dir()
            .join("processed")
            .join("labeled")
            .join("master_labeled_dataset.jsonl")
    }

    pub fn features(&self) -> PathBuf {
        self.features_dir().join("dataset_with_features.jsonl")
    }

    pub fn feature_layout(&self) -> PathBuf {
        self.features_dir().join("feature_layout.json")
    }

    fn features_dir(&self) -> PathBuf {
        self.dataset_dir().join("processed").join("features")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.dataset_dir().join("final")
    }

    /// `final/<partition>/<partition>_data.jsonl`
    pub fn split(&self, partition: Partition) -> PathBuf {
        self.final_dir()
            .join(partition.as_str())
            .join(format!("{}_data.jsonl", partition.as_str()))
    }

    pub fn split_manifest(&self) -> PathBuf {
        self.final_dir().join("split_manifest.json")
    }
}
