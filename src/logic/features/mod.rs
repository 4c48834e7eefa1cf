//! Features Module - Feature Extraction Engine
//!
//! Derives the boolean indicators a downstream classifier consumes.
//! The layout is versioned so stale feature tables are rejected.

pub mod layout;
pub mod extract;


// Re-export common types
pub use layout::{LayoutInfo, FEATURE_LAYOUT};
pub use extract::{augment_all, verify_features, FeatureRecord};
