//! Error taxonomy for the FF_Agent core.
//!
//! All fallibility lives at the two I/O boundaries: the embedding provider
//! and durable storage. Entity detection and classification are total
//! functions and have no error type.

mod embedding_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use storage_error::StorageError;

/// Top-level error wrapping every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the workspace.
pub type AgentResult<T> = Result<T, AgentError>;

impl AgentError {
    /// Whether the error is a recoverable embedding failure that read paths
    /// degrade on (empty results) instead of aborting the request.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(
            self,
            AgentError::Embedding(
                EmbeddingError::Unavailable { .. } | EmbeddingError::Timeout { .. }
            )
        )
    }
}
