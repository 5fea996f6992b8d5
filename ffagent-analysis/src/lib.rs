//! # ffagent-analysis
//!
//! Pure, deterministic question analysis: vocabulary-based entity
//! detection for the fibre-network domain and a rule-based classifier
//! that routes questions between the relational and document stores.
//! No I/O; both analyses are total functions over the question text.

pub mod classifier;
pub mod entities;

pub use classifier::QueryClassifier;
pub use entities::EntityDetector;
