//! # ffagent-learning
//!
//! The learning loop: every executed query reports an outcome here.
//! Successes reinforce stored patterns, failures become error patterns,
//! user corrections do both. Periodic maintenance decays idle patterns,
//! prunes the chronically failing and the abandoned, and backfills
//! missing embeddings. Seeding bootstraps an empty store from schema
//! hints.

pub mod engine;
pub mod maintenance;
pub mod seeding;
pub mod stats;

pub use engine::LearningEngine;
pub use maintenance::MaintenanceReport;
pub use seeding::SeedReport;
pub use stats::LearningStats;
