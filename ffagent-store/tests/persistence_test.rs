//! File-backed persistence: patterns survive a close-and-reopen cycle
//! and reads go through the read pool.

use std::path::Path;
use std::sync::Arc;

use ffagent_core::config::{EmbeddingConfig, LearningConfig, RetrievalConfig, StorageConfig};
use ffagent_embeddings::cache::L2SqliteCache;
use ffagent_embeddings::providers::HashingProvider;
use ffagent_embeddings::CachedEmbedder;
use ffagent_store::{open_store, PatternStore};

const DIMS: usize = 128;

fn embedder() -> Arc<CachedEmbedder> {
    let config = EmbeddingConfig {
        provider: "hashing".into(),
        dimensions: DIMS,
        ..Default::default()
    };
    Arc::new(CachedEmbedder::new(
        Box::new(HashingProvider::new(DIMS)),
        L2SqliteCache::open_in_memory().unwrap(),
        &config,
    ))
}

fn store_at(path: &Path) -> PatternStore {
    let pool = open_store(path, &StorageConfig::default()).unwrap();
    PatternStore::new(
        pool,
        embedder(),
        RetrievalConfig::default(),
        LearningConfig::default(),
    )
}

#[test]
fn patterns_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.db");

    {
        let store = store_at(&path);
        store
            .upsert(
                "Show all drops in Lawley",
                "SELECT * FROM sow_drops WHERE drop_number LIKE 'LAW%'",
                Some(0.3),
                serde_json::json!({"source": "test"}),
            )
            .unwrap();
    }

    // Reopen: migrations are a no-op, data and vectors are intact.
    let reopened = store_at(&path);
    assert_eq!(reopened.count().unwrap(), 1);

    let results = reopened.find_similar("Show all drops in Lawley").unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].similarity > 0.99);

    let pattern = &results[0].pattern;
    assert_eq!(pattern.embedding_model.as_deref(), Some("hashing-v1"));
    assert_eq!(pattern.embedding.as_ref().map(Vec::len), Some(DIMS));
}
