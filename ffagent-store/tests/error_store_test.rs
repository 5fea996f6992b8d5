//! Error-pattern store integration tests.

use std::sync::Arc;

use ffagent_core::config::{EmbeddingConfig, LearningConfig, RetrievalConfig};
use ffagent_core::errors::{AgentResult, EmbeddingError};
use ffagent_core::traits::IEmbeddingProvider;
use ffagent_embeddings::cache::L2SqliteCache;
use ffagent_embeddings::providers::HashingProvider;
use ffagent_embeddings::CachedEmbedder;
use ffagent_store::{open_in_memory_store, ErrorPatternStore};

const DIMS: usize = 128;

fn embedder(provider: Box<dyn IEmbeddingProvider>) -> Arc<CachedEmbedder> {
    let config = EmbeddingConfig {
        dimensions: DIMS,
        ..Default::default()
    };
    Arc::new(CachedEmbedder::new(
        provider,
        L2SqliteCache::open_in_memory().unwrap(),
        &config,
    ))
}

fn store_with(provider: Box<dyn IEmbeddingProvider>, cautionary_limit: usize) -> ErrorPatternStore {
    let pool = open_in_memory_store().unwrap();
    let retrieval = RetrievalConfig {
        cautionary_limit,
        ..Default::default()
    };
    ErrorPatternStore::new(
        pool,
        embedder(provider),
        retrieval,
        LearningConfig::default(),
    )
}

fn store() -> ErrorPatternStore {
    store_with(Box::new(HashingProvider::new(DIMS)), 2)
}

#[test]
fn repeat_failures_deduplicate() {
    let store = store();
    let id1 = store
        .record_failure(
            "show all drops",
            "SELECT * FROM drop",
            "no such table: drop",
        )
        .unwrap();
    let id2 = store
        .record_failure(
            "list the drops",
            "SELECT * FROM drop",
            "no such table: drop",
        )
        .unwrap();
    assert_eq!(id1, id2);

    let cautionary = store.find_cautionary("show all drops").unwrap();
    assert_eq!(cautionary.len(), 1);
    assert_eq!(cautionary[0].occurrence_count, 2);
}

#[test]
fn long_errors_deduplicate_on_their_prefix() {
    let store = store();
    let prefix = "x".repeat(100);
    let id1 = store
        .record_failure("q", "SELECT 1", &format!("{prefix} trailing detail one"))
        .unwrap();
    let id2 = store
        .record_failure("q", "SELECT 1", &format!("{prefix} different tail"))
        .unwrap();
    assert_eq!(id1, id2);
    assert_eq!(store.count_unresolved().unwrap(), 1);
}

#[test]
fn distinct_errors_stay_distinct() {
    let store = store();
    store
        .record_failure("q", "SELECT a FROM t", "no such column: a")
        .unwrap();
    store
        .record_failure("q", "SELECT b FROM t", "no such column: b")
        .unwrap();
    assert_eq!(store.count_unresolved().unwrap(), 2);
}

#[test]
fn cautionary_errors_rank_by_relevance_not_frequency() {
    let store = store_with(Box::new(HashingProvider::new(DIMS)), 1);
    // An unrelated failure seen twice must not displace the one matching
    // the question.
    store
        .record_failure(
            "what is the total budget",
            "SELECT * FROM budgets",
            "no such table: budgets",
        )
        .unwrap();
    store
        .record_failure(
            "show the budget figures",
            "SELECT * FROM budgets",
            "no such table: budgets",
        )
        .unwrap();
    store
        .record_failure(
            "show all drops",
            "SELECT * FROM drop",
            "no such table: drop",
        )
        .unwrap();

    let cautionary = store.find_cautionary("show drops in lawley").unwrap();
    assert_eq!(cautionary.len(), 1);
    assert_eq!(cautionary[0].attempted_query, "SELECT * FROM drop");
}

#[test]
fn cautionary_list_is_bounded_by_the_limit() {
    let store = store();
    for i in 0..3 {
        store
            .record_failure(&format!("question {i}"), &format!("SELECT {i}"), "syntax error")
            .unwrap();
    }
    let cautionary = store.find_cautionary("question 0").unwrap();
    assert_eq!(cautionary.len(), 2); // configured limit
}

#[test]
fn resolution_removes_errors_from_cautionary_context() {
    let store = store();
    store
        .record_failure(
            "who installed drops",
            "SELECT * FROM installers",
            "no such table: installers",
        )
        .unwrap();

    let resolved = store
        .resolve("SELECT * FROM installers", "SELECT * FROM staff")
        .unwrap();
    assert_eq!(resolved, 1);
    assert!(store.find_cautionary("who installed drops").unwrap().is_empty());
    assert_eq!(store.count_unresolved().unwrap(), 0);

    // Resolving again is a no-op.
    assert_eq!(
        store
            .resolve("SELECT * FROM installers", "SELECT * FROM staff")
            .unwrap(),
        0
    );
}

struct DownProvider;

impl IEmbeddingProvider for DownProvider {
    fn embed(&self, _text: &str) -> AgentResult<Vec<f32>> {
        Err(EmbeddingError::Unavailable {
            reason: "offline".to_string(),
        }
        .into())
    }
    fn embed_batch(&self, _texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
        Err(EmbeddingError::Unavailable {
            reason: "offline".to_string(),
        }
        .into())
    }
    fn dimensions(&self) -> usize {
        DIMS
    }
    fn model_id(&self) -> &str {
        "hashing-v1"
    }
    fn is_available(&self) -> bool {
        false
    }
}

#[test]
fn backfill_repairs_errors_recorded_during_an_outage() {
    let pool = open_in_memory_store().unwrap();
    let retrieval = RetrievalConfig::default();

    // Provider down: the failure is still recorded, without a vector, and
    // cautionary lookup degrades to empty.
    let degraded = ErrorPatternStore::new(
        Arc::clone(&pool),
        embedder(Box::new(DownProvider)),
        retrieval.clone(),
        LearningConfig::default(),
    );
    degraded
        .record_failure(
            "show all drops",
            "SELECT * FROM drop",
            "no such table: drop",
        )
        .unwrap();
    assert_eq!(degraded.count_unresolved().unwrap(), 1);
    assert!(degraded.find_cautionary("show all drops").unwrap().is_empty());

    // Provider back: backfill repairs the row and it becomes retrievable.
    let healthy = ErrorPatternStore::new(
        pool,
        embedder(Box::new(HashingProvider::new(DIMS))),
        retrieval,
        LearningConfig::default(),
    );
    assert_eq!(healthy.backfill_embeddings().unwrap(), 1);
    let cautionary = healthy.find_cautionary("show all drops").unwrap();
    assert_eq!(cautionary.len(), 1);
    assert_eq!(cautionary[0].embedding_model.as_deref(), Some("hashing-v1"));
}
