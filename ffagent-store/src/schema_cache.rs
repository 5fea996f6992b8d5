//! Owned cache of target-database schema hints.
//!
//! The assistant holds its own copy of the schema it writes queries
//! against, refreshed on demand via `index_schema` and served from
//! memory within a TTL. Relevance is keyword overlap between the
//! question and each hint's table, column and description text.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use ffagent_core::config::RetrievalConfig;
use ffagent_core::errors::AgentResult;
use ffagent_core::models::SchemaHint;
use tracing::debug;

use crate::pool::ConnectionPool;
use crate::queries::schema_ops;

pub struct SchemaCache {
    pool: Arc<ConnectionPool>,
    ttl: Duration,
    limit: usize,
    cached: Mutex<Option<(Instant, Arc<Vec<SchemaHint>>)>>,
}

impl SchemaCache {
    pub fn new(pool: Arc<ConnectionPool>, config: &RetrievalConfig) -> Self {
        Self {
            pool,
            ttl: Duration::from_secs(config.schema_ttl_secs),
            limit: config.schema_hint_limit,
            cached: Mutex::new(None),
        }
    }

    /// Replace the indexed schema and drop the in-memory copy.
    pub fn index_schema(&self, hints: &[SchemaHint]) -> AgentResult<()> {
        self.pool
            .with_writer(|conn| schema_ops::replace_hints(conn, hints))?;
        self.invalidate();
        debug!(hints = hints.len(), "schema hints reindexed");
        Ok(())
    }

    pub fn invalidate(&self) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = None;
        }
    }

    /// The hints most relevant to the question, best overlap first.
    /// Hints with no overlap are omitted entirely.
    pub fn relevant(&self, question: &str) -> AgentResult<Vec<SchemaHint>> {
        let hints = self.load()?;
        let terms: Vec<String> = tokenize(question);

        let mut scored: Vec<(usize, &SchemaHint)> = hints
            .iter()
            .filter_map(|hint| {
                let score = overlap_score(hint, &terms);
                (score > 0).then_some((score, hint))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(self.limit);
        Ok(scored.into_iter().map(|(_, h)| h.clone()).collect())
    }

    /// Every stored hint, from cache when fresh.
    pub fn all(&self) -> AgentResult<Arc<Vec<SchemaHint>>> {
        self.load()
    }

    fn load(&self) -> AgentResult<Arc<Vec<SchemaHint>>> {
        if let Ok(cached) = self.cached.lock() {
            if let Some((at, hints)) = cached.as_ref() {
                if at.elapsed() < self.ttl {
                    return Ok(Arc::clone(hints));
                }
            }
        }
        let hints = Arc::new(self.pool.with_reader(schema_ops::all_hints)?);
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some((Instant::now(), Arc::clone(&hints)));
        }
        Ok(hints)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() > 2)
        .map(|s| s.to_lowercase())
        .collect()
}

fn overlap_score(hint: &SchemaHint, terms: &[String]) -> usize {
    let mut haystack = tokenize(&hint.table_name);
    if let Some(col) = &hint.column_name {
        haystack.extend(tokenize(col));
    }
    haystack.extend(tokenize(&hint.description));
    // Prefix matching in either direction covers plurals ("drops" vs
    // the "drop" column description) without a stemmer.
    terms
        .iter()
        .filter(|t| {
            haystack
                .iter()
                .any(|h| h.starts_with(t.as_str()) || t.starts_with(h.as_str()))
        })
        .count()
}
