use serde::{Deserialize, Serialize};

/// Embedding cache diagnostics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries currently resident in the L1 tier.
    pub l1_entries: u64,
    /// Entries buffered for the next L2 flush.
    pub pending_writes: u64,
}

impl CacheStats {
    /// Fraction of lookups served without a provider call.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
