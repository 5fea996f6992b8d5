use serde::{Deserialize, Serialize};

use super::defaults;

/// Durable store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Number of read connections in the pool (writes use one dedicated
    /// connection).
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
