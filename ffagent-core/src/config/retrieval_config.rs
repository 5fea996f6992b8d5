use serde::{Deserialize, Serialize};

use super::defaults;

/// Context-assembly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Similar patterns retrieved per question.
    pub similar_limit: usize,
    /// Cautionary error patterns retrieved per question.
    pub cautionary_limit: usize,
    /// Patterns below this success rate are excluded from similarity search.
    pub min_success_rate: f64,
    /// Cosine similarity floor below which a pattern is not a match.
    pub min_similarity: f64,
    /// Schema hint rows surfaced per question.
    pub schema_hint_limit: usize,
    /// Schema hint cache time-to-live (seconds).
    pub schema_ttl_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            similar_limit: defaults::DEFAULT_SIMILAR_LIMIT,
            cautionary_limit: defaults::DEFAULT_CAUTIONARY_LIMIT,
            min_success_rate: defaults::DEFAULT_MIN_SUCCESS_RATE,
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            schema_hint_limit: defaults::DEFAULT_SCHEMA_HINT_LIMIT,
            schema_ttl_secs: defaults::DEFAULT_SCHEMA_TTL_SECS,
        }
    }
}
