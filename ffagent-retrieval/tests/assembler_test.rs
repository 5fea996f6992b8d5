//! End-to-end context assembly against an in-memory store.

use std::sync::Arc;

use ffagent_core::config::{EmbeddingConfig, LearningConfig, RetrievalConfig};
use ffagent_core::errors::{AgentResult, EmbeddingError};
use ffagent_core::models::{QueryType, SchemaHint, TargetStore};
use ffagent_core::traits::IEmbeddingProvider;
use ffagent_embeddings::cache::L2SqliteCache;
use ffagent_embeddings::providers::HashingProvider;
use ffagent_embeddings::CachedEmbedder;
use ffagent_retrieval::ContextAssembler;
use ffagent_store::{open_in_memory_store, ErrorPatternStore, PatternStore, SchemaCache};

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

fn build(
    provider: Box<dyn IEmbeddingProvider>,
) -> (Arc<PatternStore>, Arc<ErrorPatternStore>, ContextAssembler) {
    let pool = open_in_memory_store().unwrap();
    let retrieval = RetrievalConfig::default();
    let embedder = embedder(provider);
    let patterns = Arc::new(PatternStore::new(
        Arc::clone(&pool),
        Arc::clone(&embedder),
        retrieval.clone(),
        LearningConfig::default(),
    ));
    let errors = Arc::new(ErrorPatternStore::new(
        Arc::clone(&pool),
        embedder,
        retrieval.clone(),
        LearningConfig::default(),
    ));
    let schema = Arc::new(SchemaCache::new(Arc::clone(&pool), &retrieval));
    schema
        .index_schema(&[
            SchemaHint::table("sow_drops", "Fibre drop installations"),
            SchemaHint::column("sow_drops", "drop_number", "Drop identifier with project prefix"),
            SchemaHint::table("sow_poles", "Pole records"),
        ])
        .unwrap();

    let assembler = ContextAssembler::new(Arc::clone(&patterns), Arc::clone(&errors), schema);
    (patterns, errors, assembler)
}

#[test]
fn context_carries_analysis_and_all_sections() {
    let (patterns, _errors, assembler) = build(Box::new(HashingProvider::new(DIMS)));
    patterns
        .upsert(
            "Show all drops in Lawley",
            "SELECT * FROM sow_drops WHERE drop_number LIKE 'LAW%'",
            Some(0.2),
            serde_json::json!({"source": "test"}),
        )
        .unwrap();

    let ctx = assembler.assemble("Show all drops in Lawley");

    assert_eq!(ctx.question, "Show all drops in Lawley");
    assert_eq!(ctx.classification.query_type, QueryType::Infrastructure);
    assert_eq!(ctx.classification.primary_store(), TargetStore::Relational);
    assert_eq!(ctx.detected_entities.project_names, vec!["Lawley"]);

    assert_eq!(ctx.similar_patterns.len(), 1);
    assert!(ctx.similar_patterns[0].similarity > 0.99);
    assert!(ctx
        .schema_hints
        .iter()
        .any(|h| h.table_name == "sow_drops"));
    assert!(ctx
        .domain_hints
        .iter()
        .any(|h| h.contains("drop_number")));
    assert!(ctx.cautionary_patterns.is_empty());
}

#[test]
fn cautionary_patterns_surface_unresolved_errors() {
    let (_patterns, errors, assembler) = build(Box::new(HashingProvider::new(DIMS)));
    errors
        .record_failure(
            "show all drops",
            "SELECT * FROM drop",
            "no such table: drop",
        )
        .unwrap();

    let ctx = assembler.assemble("Show all drops");
    assert_eq!(ctx.cautionary_patterns.len(), 1);
    assert_eq!(ctx.cautionary_patterns[0].attempted_query, "SELECT * FROM drop");

    // A resolved error no longer appears.
    errors
        .resolve("SELECT * FROM drop", "SELECT * FROM sow_drops")
        .unwrap();
    let ctx = assembler.assemble("Show all drops");
    assert!(ctx.cautionary_patterns.is_empty());
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
fn assembly_survives_an_embedding_outage() {
    let (_patterns, _errors, assembler) = build(Box::new(DownProvider));

    let ctx = assembler.assemble("Which technician installed the most drops?");

    // Analysis still runs; only the embedding-backed sections are empty.
    assert_eq!(ctx.classification.query_type, QueryType::Hybrid);
    assert!(ctx.classification.needs_cross_store_join);
    assert!(ctx.similar_patterns.is_empty());
    assert!(ctx.cautionary_patterns.is_empty());
    assert!(!ctx.schema_hints.is_empty());
}
