//! Error handling

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline error types
///
/// Every variant is fatal for the stage that raised it; nothing is retried.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A required upstream artifact is not on disk
    #[error("Required input not found: {path}")]
    MissingInput { path: PathBuf },

    /// A severity class cannot be represented in every partition
    #[error(
        "Stratification infeasible: severity class {class} has {count} record(s), \
         at least {required} required to populate every partition"
    )]
    StratificationInfeasible {
        class: String,
        count: usize,
        required: usize,
    },

    /// Partition sizes too small for the number of severity classes
    #[error(
        "Stratification infeasible: {side} side would hold {size} record(s) \
         for {classes} severity classes"
    )]
    PartitionTooSmall {
        side: &'static str,
        size: usize,
        classes: usize,
    },

    /// A record is missing a field or carries a value of the wrong shape
    #[error("Schema mismatch in {location}: {message}")]
    SchemaMismatch { location: String, message: String },

    /// The catalog has no rule the evaluator needs
    #[error("Rule catalog has no {category} rule for parameter {parameter}")]
    MissingRule { category: String, parameter: String },

    /// Invalid ratios, seeds, window or config file content
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error on a specific path
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn schema(location: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch {
            location: location.into(),
            message: message.into(),
        }
    }
}
