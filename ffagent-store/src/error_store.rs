//! High-level error-pattern store.
//!
//! Mirrors the pattern store's embedding policy: the failing question is
//! embedded on write (retry once, then NULL), cautionary retrieval ranks
//! unresolved errors by similarity to the incoming question, and the
//! backfill pass repairs vectorless rows once the provider returns.

use std::sync::Arc;

use ffagent_core::config::{LearningConfig, RetrievalConfig};
use ffagent_core::errors::AgentResult;
use ffagent_core::models::ErrorPattern;
use ffagent_embeddings::CachedEmbedder;
use tracing::{debug, info};

use crate::pool::ConnectionPool;
use crate::queries::error_ops;

/// Store of failed query generations, deduplicated per (query, error).
pub struct ErrorPatternStore {
    pool: Arc<ConnectionPool>,
    embedder: Arc<CachedEmbedder>,
    retrieval: RetrievalConfig,
    learning: LearningConfig,
}

impl ErrorPatternStore {
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

    /// Record a failed generation. Repeats bump the occurrence count.
    pub fn record_failure(
        &self,
        question: &str,
        attempted_query: &str,
        error_message: &str,
    ) -> AgentResult<i64> {
        let embedding = crate::embed_with_retry(&self.embedder, question)?;
        let id = self.pool.with_writer(|conn| {
            error_ops::record_failure(
                conn,
                question,
                attempted_query,
                error_message,
                embedding.as_deref(),
                embedding.as_ref().map(|_| self.embedder.model_id()),
            )
        })?;
        debug!(id, "recorded error pattern");
        Ok(id)
    }

    /// Unresolved errors most relevant to the question, ranked by cosine
    /// similarity of their failing questions.
    ///
    /// An unavailable embedding provider yields an empty result, not an
    /// error: context assembly proceeds without cautionary examples.
    pub fn find_cautionary(&self, question: &str) -> AgentResult<Vec<ErrorPattern>> {
        let embedding = match self.embedder.embed(question) {
            Ok(v) => v,
            Err(e) if e.is_embedding_unavailable() => {
                debug!(error = %e, "cautionary lookup degraded to empty result");
                return Ok(vec![]);
            }
            Err(e) => return Err(e),
        };
        self.pool.with_reader(|conn| {
            error_ops::find_cautionary(
                conn,
                &embedding,
                self.embedder.model_id(),
                self.retrieval.cautionary_limit,
            )
        })
    }

    /// Mark every failure of `attempted_query` resolved by a correction.
    /// Returns the number of error rows resolved.
    pub fn resolve(&self, attempted_query: &str, resolution_query: &str) -> AgentResult<usize> {
        self.pool
            .with_writer(|conn| error_ops::resolve_by_query(conn, attempted_query, resolution_query))
    }

    pub fn count_unresolved(&self) -> AgentResult<u64> {
        self.pool.with_reader(error_ops::count_unresolved)
    }

    /// Re-embed unresolved errors whose question vector is missing or came
    /// from another model, one batch per call. Returns the number of rows
    /// backfilled.
    pub fn backfill_embeddings(&self) -> AgentResult<usize> {
        let model = self.embedder.model_id().to_string();
        let rows = self.pool.with_reader(|conn| {
            error_ops::errors_needing_embedding(conn, &model, self.learning.backfill_batch)
        })?;
        if rows.is_empty() {
            return Ok(0);
        }

        let questions: Vec<String> = rows.iter().map(|(_, q)| q.clone()).collect();
        let vectors = match self.embedder.embed_batch(&questions) {
            Ok(v) => v,
            Err(e) if e.is_embedding_unavailable() => {
                debug!(error = %e, "error backfill skipped while provider unavailable");
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        let written = self.pool.with_writer(|conn| {
            let mut written = 0usize;
            for ((id, _), vector) in rows.iter().zip(&vectors) {
                error_ops::set_embedding(conn, *id, vector, &model)?;
                written += 1;
            }
            Ok(written)
        })?;
        info!(backfilled = written, "error embedding backfill complete");
        Ok(written)
    }
}
