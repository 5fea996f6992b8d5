//! High-level query-pattern store.
//!
//! Owns the embedding step around the raw SQL: similarity search embeds
//! the incoming question, writes embed the stored one. Embedding outages
//! degrade reads to empty results and writes to NULL vectors; the
//! backfill pass repairs those rows once the provider returns.

use std::sync::Arc;

use ffagent_core::config::{LearningConfig, RetrievalConfig};
use ffagent_core::errors::AgentResult;
use ffagent_core::models::{QueryPattern, ScoredPattern};
use ffagent_embeddings::CachedEmbedder;
use tracing::{debug, info};

use crate::pool::ConnectionPool;
use crate::queries::{maintenance, pattern_ops, similarity};

/// Counts from one decay-and-prune pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayReport {
    pub decayed: usize,
    pub pruned_low_quality: usize,
    pub pruned_stale: usize,
}

/// Pattern store with embedding-aware reads and writes.
pub struct PatternStore {
    pool: Arc<ConnectionPool>,
    embedder: Arc<CachedEmbedder>,
    retrieval: RetrievalConfig,
    learning: LearningConfig,
}

impl PatternStore {
    pub fn new(
        pool: Arc<ConnectionPool>,
        embedder: Arc<CachedEmbedder>,
        retrieval: RetrievalConfig,
        learning: LearningConfig,
    ) -> Self {
        Self {
            pool,
            embedder,
            retrieval,
            learning,
        }
    }

    /// Find stored patterns similar to the question.
    ///
    /// An unavailable embedding provider yields an empty result, not an
    /// error: context assembly proceeds without examples.
    pub fn find_similar(&self, question: &str) -> AgentResult<Vec<ScoredPattern>> {
        let embedding = match self.embedder.embed(question) {
            Ok(v) => v,
            Err(e) if e.is_embedding_unavailable() => {
                debug!(error = %e, "similarity search degraded to empty result");
                return Ok(vec![]);
            }
            Err(e) => return Err(e),
        };
        self.pool.with_reader(|conn| {
            similarity::search_similar(
                conn,
                &embedding,
                self.embedder.model_id(),
                self.retrieval.similar_limit,
                self.retrieval.min_similarity,
                self.retrieval.min_success_rate,
            )
        })
    }

    /// Record a successful (question, query) observation.
    ///
    /// The question is embedded with one retry; if the provider stays
    /// down the pattern is stored without a vector and picked up by the
    /// next backfill run. Returns the pattern row id.
    pub fn upsert(
        &self,
        question: &str,
        generated_query: &str,
        execution_time: Option<f64>,
        metadata: serde_json::Value,
    ) -> AgentResult<i64> {
        let embedding = crate::embed_with_retry(&self.embedder, question)?;
        let new = pattern_ops::NewPattern {
            question,
            generated_query,
            embedding: embedding.as_deref(),
            embedding_model: embedding.as_ref().map(|_| self.embedder.model_id()),
            execution_time,
            metadata: &metadata,
        };
        self.pool
            .with_writer(|conn| pattern_ops::upsert_pattern(conn, &new, self.learning.success_bump))
    }

    pub fn get_by_query(&self, generated_query: &str) -> AgentResult<Option<QueryPattern>> {
        self.pool
            .with_reader(|conn| pattern_ops::get_by_query(conn, generated_query))
    }

    pub fn count(&self) -> AgentResult<u64> {
        self.pool.with_reader(pattern_ops::count)
    }

    /// Decay idle patterns, then delete the chronically failing and the
    /// long-abandoned ones.
    pub fn decay_and_prune(&self) -> AgentResult<DecayReport> {
        let cfg = &self.learning;
        let report = self.pool.with_writer(|conn| {
            let decayed = maintenance::decay_idle(conn, cfg.decay_factor, cfg.decay_idle_days)?;
            let pruned_low_quality = maintenance::prune_low_quality(
                conn,
                cfg.prune_success_floor,
                cfg.prune_min_executions,
            )?;
            let pruned_stale =
                maintenance::prune_stale(conn, cfg.stale_days, cfg.stale_min_executions)?;
            Ok(DecayReport {
                decayed,
                pruned_low_quality,
                pruned_stale,
            })
        })?;
        info!(
            decayed = report.decayed,
            pruned_low_quality = report.pruned_low_quality,
            pruned_stale = report.pruned_stale,
            "pattern maintenance complete"
        );
        Ok(report)
    }

    /// Re-embed patterns whose vector is missing or came from another
    /// model, one batch per call. Returns the number of rows backfilled.
    pub fn backfill_embeddings(&self) -> AgentResult<usize> {
        let model = self.embedder.model_id().to_string();
        let rows = self.pool.with_reader(|conn| {
            pattern_ops::patterns_needing_embedding(conn, &model, self.learning.backfill_batch)
        })?;
        if rows.is_empty() {
            return Ok(0);
        }

        let questions: Vec<String> = rows.iter().map(|(_, q)| q.clone()).collect();
        let vectors = match self.embedder.embed_batch(&questions) {
            Ok(v) => v,
            Err(e) if e.is_embedding_unavailable() => {
                debug!(error = %e, "backfill skipped while provider unavailable");
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let written = self.pool.with_writer(|conn| {
            let mut written = 0usize;
            for ((id, _), vector) in rows.iter().zip(&vectors) {
                pattern_ops::set_embedding(conn, *id, vector, &model)?;
                written += 1;
            }
            Ok(written)
        })?;
        info!(backfilled = written, "embedding backfill complete");
        Ok(written)
    }
}
