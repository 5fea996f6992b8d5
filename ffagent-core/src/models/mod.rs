//! Domain models shared across the workspace.

mod cache_stats;
mod classification;
mod context;
mod entities;
mod error_pattern;
mod generated_query;
mod outcome;
mod pattern;
mod schema_hint;

pub use cache_stats::CacheStats;
pub use classification::{Complexity, QueryClassification, QueryType, TargetStore};
pub use context::{QueryContext, ScoredPattern};
pub use entities::{EntityCategory, EntityDetectionResult};
pub use error_pattern::ErrorPattern;
pub use generated_query::GeneratedQuery;
pub use outcome::QueryOutcome;
pub use pattern::QueryPattern;
pub use schema_hint::SchemaHint;
