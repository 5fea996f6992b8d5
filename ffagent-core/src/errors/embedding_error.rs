/// Embedding provider errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("embedding provider timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("stale embedding model: stored {stored}, current {current}")]
    StaleModel { stored: String, current: String },
}
