use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider selection: "remote" (HTTP) or "hashing" (local, deterministic).
    pub provider: String,
    /// Model identifier. Stored alongside every vector; vectors from a
    /// different model are never compared against this one.
    pub model_id: String,
    /// Vector dimensionality produced by the model.
    pub dimensions: usize,
    /// Remote provider endpoint URL.
    pub endpoint: String,
    /// Bearer token for the remote provider, if required.
    pub api_key: Option<String>,
    /// Request timeout for remote embedding calls.
    pub timeout_secs: u64,
    /// L1 in-memory cache capacity (entries).
    pub l1_cache_size: u64,
    /// The pending L2 buffer is flushed every N cache misses.
    pub flush_every_misses: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_PROVIDER.to_string(),
            model_id: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            flush_every_misses: defaults::DEFAULT_FLUSH_EVERY_MISSES,
        }
    }
}
