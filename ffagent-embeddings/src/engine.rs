//! Cached embedding engine.
//!
//! Wraps a provider with the two-tier cache: L1 in-memory, then the
//! pending write buffer, then L2 SQLite, then the provider. Misses are
//! buffered and flushed to L2 in batches so a burst of new questions
//! costs one transaction, not one write per question.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use ffagent_core::config::EmbeddingConfig;
use ffagent_core::errors::{AgentResult, EmbeddingError};
use ffagent_core::models::CacheStats;
use ffagent_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

use crate::cache::{cache_key, L1MemoryCache, L2SqliteCache};

/// Embedding provider with two-tier caching and hit/miss counters.
pub struct CachedEmbedder {
    provider: Box<dyn IEmbeddingProvider>,
    l1: L1MemoryCache,
    l2: L2SqliteCache,
    /// Entries generated since the last L2 flush. Consulted on lookups so
    /// an unflushed vector is still a cache hit.
    pending: Mutex<Vec<(String, Vec<f32>)>>,
    hits: AtomicU64,
    misses: AtomicU64,
    flush_every: u64,
}

impl CachedEmbedder {
    pub fn new(
        provider: Box<dyn IEmbeddingProvider>,
        l2: L2SqliteCache,
        config: &EmbeddingConfig,
    ) -> Self {
        Self {
            provider,
            l1: L1MemoryCache::new(config.l1_cache_size),
            l2,
            pending: Mutex::new(Vec::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            flush_every: config.flush_every_misses,
        }
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    /// Embed one text, consulting L1, the pending buffer, and L2 before
    /// calling the provider.
    pub fn embed(&self, text: &str) -> AgentResult<Vec<f32>> {
        let key = cache_key(self.provider.model_id(), text);

        if let Some(vec) = self.l1.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(vec);
        }

        if let Some(vec) = self.lookup_pending(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(vec);
        }

        if let Some(vec) = self.l2.get(&key)? {
            self.hits.fetch_add(1, Ordering::Relaxed);
            self.l1.insert(key, vec.clone());
            return Ok(vec);
        }

        let vec = self.generate(text)?;
        self.record_miss(key, vec.clone())?;
        Ok(vec)
    }

    /// Embed a batch, generating only the texts absent from every tier.
    pub fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
        let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut missing: Vec<usize> = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            let key = cache_key(self.provider.model_id(), text);
            if let Some(vec) = self.l1.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                results[i] = Some(vec);
            } else if let Some(vec) = self.lookup_pending(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                results[i] = Some(vec);
            } else if let Some(vec) = self.l2.get(&key)? {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.l1.insert(key, vec.clone());
                results[i] = Some(vec);
            } else {
                missing.push(i);
            }
        }

        if !missing.is_empty() {
            let to_embed: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let generated = self.provider.embed_batch(&to_embed)?;
            for (slot, vec) in missing.iter().zip(generated) {
                self.validate_dimensions(&vec)?;
                let key = cache_key(self.provider.model_id(), &texts[*slot]);
                self.record_miss(key, vec.clone())?;
                results[*slot] = Some(vec);
            }
        }

        Ok(results.into_iter().flatten().collect())
    }

    /// An unflushed entry is still a cache hit; without this check an
    /// entry evicted from L1 before its flush would be regenerated and
    /// buffered twice.
    fn lookup_pending(&self, key: &str) -> Option<Vec<f32>> {
        let pending = self.pending.lock().ok()?;
        pending
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, vec)| vec.clone())
    }

    fn generate(&self, text: &str) -> AgentResult<Vec<f32>> {
        let vec = self.provider.embed(text)?;
        self.validate_dimensions(&vec)?;
        Ok(vec)
    }

    fn validate_dimensions(&self, vec: &[f32]) -> AgentResult<()> {
        if vec.len() != self.provider.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.provider.dimensions(),
                actual: vec.len(),
            }
            .into());
        }
        Ok(())
    }

    fn record_miss(&self, key: String, vec: Vec<f32>) -> AgentResult<()> {
        let misses = self.misses.fetch_add(1, Ordering::Relaxed) + 1;
        self.l1.insert(key.clone(), vec.clone());
        if let Ok(mut pending) = self.pending.lock() {
            pending.push((key, vec));
        }
        if self.flush_every > 0 && misses % self.flush_every == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Drain the pending buffer into L2.
    pub fn flush(&self) -> AgentResult<()> {
        let drained: Vec<(String, Vec<f32>)> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return Ok(()),
        };
        if drained.is_empty() {
            return Ok(());
        }
        debug!(count = drained.len(), "flushing pending embeddings");
        self.l2.insert_batch(self.provider.model_id(), &drained)
    }

    pub fn stats(&self) -> CacheStats {
        let pending = self.pending.lock().map(|p| p.len() as u64).unwrap_or(0);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            l1_entries: self.l1.entry_count(),
            pending_writes: pending,
        }
    }
}

impl Drop for CachedEmbedder {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "failed to flush embedding cache on shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::HashingProvider;
    use ffagent_core::errors::AgentError;

    fn embedder(flush_every: u64) -> CachedEmbedder {
        let config = EmbeddingConfig {
            provider: "hashing".into(),
            dimensions: 64,
            flush_every_misses: flush_every,
            ..Default::default()
        };
        CachedEmbedder::new(
            Box::new(HashingProvider::new(64)),
            L2SqliteCache::open_in_memory().unwrap(),
            &config,
        )
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let e = embedder(10);
        let a = e.embed("show all drops").unwrap();
        let b = e.embed("show all drops").unwrap();
        assert_eq!(a, b);

        let stats = e.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn flush_happens_every_n_misses() {
        let e = embedder(3);
        for i in 0..3 {
            e.embed(&format!("question {i}")).unwrap();
        }
        assert_eq!(e.stats().pending_writes, 0);
        assert_eq!(e.l2.entry_count().unwrap(), 3);

        e.embed("question 3").unwrap();
        assert_eq!(e.stats().pending_writes, 1);
    }

    #[test]
    fn unflushed_entries_are_still_hits() {
        let e = embedder(100);
        e.embed("pending question").unwrap();
        // Evicting L1 would force the pending buffer path; here the entry
        // is in both, and either way the provider is not called again.
        e.embed("pending question").unwrap();
        assert_eq!(e.stats().hits, 1);
        assert_eq!(e.stats().misses, 1);
    }

    #[test]
    fn batch_skips_cached_texts() {
        let e = embedder(100);
        e.embed("alpha").unwrap();

        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let vecs = e.embed_batch(&texts).unwrap();
        assert_eq!(vecs.len(), 2);
        assert_eq!(vecs[0], e.embed("alpha").unwrap());

        let stats = e.stats();
        assert_eq!(stats.misses, 2); // alpha once, beta once
    }

    #[test]
    fn batch_reads_the_pending_buffer() {
        let e = embedder(100);
        // Plant an unflushed entry that is absent from L1 and L2; the
        // planted vector differs from what the provider would generate.
        let key = cache_key("hashing-v1", "planted question");
        let planted = vec![0.25f32; 64];
        e.pending.lock().unwrap().push((key, planted.clone()));

        let vecs = e.embed_batch(&["planted question".to_string()]).unwrap();
        assert_eq!(vecs[0], planted);

        let stats = e.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.pending_writes, 1); // not buffered a second time
    }

    #[test]
    fn explicit_flush_persists_to_l2() {
        let e = embedder(100);
        e.embed("durable question").unwrap();
        assert_eq!(e.l2.entry_count().unwrap(), 0);
        e.flush().unwrap();
        assert_eq!(e.l2.entry_count().unwrap(), 1);
        assert_eq!(e.stats().pending_writes, 0);
    }

    struct WrongDimsProvider;

    impl IEmbeddingProvider for WrongDimsProvider {
        fn embed(&self, _text: &str) -> AgentResult<Vec<f32>> {
            Ok(vec![0.0; 8])
        }
        fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0; 8]).collect())
        }
        fn dimensions(&self) -> usize {
            64
        }
        fn model_id(&self) -> &str {
            "wrong-dims"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let config = EmbeddingConfig {
            dimensions: 64,
            ..Default::default()
        };
        let e = CachedEmbedder::new(
            Box::new(WrongDimsProvider),
            L2SqliteCache::open_in_memory().unwrap(),
            &config,
        );
        let err = e.embed("anything").unwrap_err();
        assert!(matches!(
            err,
            AgentError::Embedding(EmbeddingError::DimensionMismatch {
                expected: 64,
                actual: 8
            })
        ));
    }
}
