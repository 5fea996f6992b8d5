use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored question/query pair with outcome statistics.
///
/// At most one pattern exists per distinct `generated_query`; repeated
/// storage of the same query updates the counters instead of inserting a
/// second row. Distinct phrasings of the same intent remain distinct rows
/// and are reconciled at retrieval time by similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPattern {
    pub id: i64,
    /// The user's original phrasing.
    pub question: String,
    /// The store-specific query text (SQL, or a document-store directive).
    pub generated_query: String,
    /// Question embedding. `None` when embedding generation failed at write
    /// time; such rows are excluded from similarity search until backfilled.
    pub embedding: Option<Vec<f32>>,
    /// Model that produced the embedding. Vectors from a different model
    /// are never compared against the current one.
    pub embedding_model: Option<String>,
    /// Additively bumped, multiplicatively decayed score in [0, 1].
    pub success_rate: f64,
    pub execution_count: u64,
    /// Running average, updated as `(avg * count + new) / (count + 1)`.
    pub avg_execution_time: f64,
    pub last_used: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Open key/value bag recording provenance (seed, user-correction,
    /// production-observed, batch-import).
    pub metadata: serde_json::Value,
}
