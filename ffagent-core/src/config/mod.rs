//! Workspace configuration.
//!
//! Every tunable that was a scattered magic number in earlier iterations of
//! the agent (decay factors, prune thresholds, cache sizes) is a named field
//! here with a documented default.

pub mod defaults;

mod embedding_config;
mod learning_config;
mod retrieval_config;
mod storage_config;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use learning_config::LearningConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use crate::errors::{AgentError, AgentResult};

/// Top-level configuration for the FF_Agent core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
    pub retrieval: RetrievalConfig,
    pub learning: LearningConfig,
}

impl AgentConfig {
    /// Parse a configuration from TOML text. Missing sections and fields
    /// fall back to defaults.
    pub fn from_toml_str(text: &str) -> AgentResult<Self> {
        toml::from_str(text).map_err(|e| AgentError::Config(e.to_string()))
    }
}
