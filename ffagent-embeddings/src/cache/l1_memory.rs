use std::time::Duration;

use moka::sync::Cache;

/// Bounded in-memory cache for hot embeddings.
///
/// Entries expire after a day, or an hour of idleness, whichever comes
/// first. Eviction is size-based beyond the configured capacity.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(24 * 3600))
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let cache = L1MemoryCache::new(16);
        cache.insert("k".into(), vec![1.0, 2.0]);
        assert_eq!(cache.get("k"), Some(vec![1.0, 2.0]));
        assert_eq!(cache.get("missing"), None);
    }
}
