//! Evaluator Module
//!
//! Checks each configuration against the rules that apply to it and flattens
//! the findings into labeled records, one per (configuration, parameter).
//!
//! ## Structure
//! - `types`: Finding, LabeledRecord
//! - `references`: Fixed per-parameter severities and CIS references
//! - `engine`: Evaluation logic and label statistics
//!
//! ## Usage
//! ```ignore
//! let catalog = RuleCatalog::builtin();
//! let records = evaluate(&configs, &catalog)?;
//! assert_eq!(records.len(), configs.iter().map(|c| c.category.rules_per_config()).sum());
//! ```

pub mod types;
pub mod references;
pub mod engine;


pub use types::LabeledRecord;
pub use engine::{evaluate, summarize, LabelSummary};
