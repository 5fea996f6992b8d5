use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded query failure, surfaced later as negative context.
///
/// Identical `(attempted_query, error-message-prefix)` pairs increment
/// `occurrence_count` instead of duplicating. Error patterns never block
/// generation; they only inform it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPattern {
    pub id: i64,
    pub question: String,
    pub attempted_query: String,
    pub error_message: String,
    /// Vector of the failing question, used to rank cautionary context
    /// by relevance. None while the embedding provider is down.
    pub embedding: Option<Vec<f32>>,
    pub embedding_model: Option<String>,
    pub occurrence_count: u64,
    /// Set when a correction was supplied for this failure.
    pub resolved: bool,
    pub resolution_query: Option<String>,
    pub created_at: DateTime<Utc>,
}
