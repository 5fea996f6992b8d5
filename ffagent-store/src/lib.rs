//! # ffagent-store
//!
//! SQLite persistence for the FF_Agent core: the query-pattern store with
//! brute-force vector similarity search, the error-pattern store, and the
//! schema-hint cache. One write connection behind a mutex plus a
//! round-robin pool of read connections, WAL mode throughout.

pub mod error_store;
pub mod migrations;
pub mod pattern_store;
pub mod pool;
pub mod queries;
pub mod schema_cache;
pub mod vector;

use std::path::Path;
use std::sync::Arc;

use ffagent_core::config::StorageConfig;
use ffagent_core::errors::{AgentError, AgentResult, StorageError};
use tracing::info;

pub use error_store::ErrorPatternStore;
pub use pattern_store::{DecayReport, PatternStore};
pub use pool::ConnectionPool;
pub use schema_cache::SchemaCache;

/// Convert a low-level storage failure message into the workspace error type.
pub fn to_storage_err(message: impl Into<String>) -> AgentError {
    StorageError::Sqlite {
        message: message.into(),
    }
    .into()
}

/// Embed text for a write path: one retry on an unavailable provider,
/// then `None` so the row is stored without a vector and repaired by the
/// next backfill run. Non-availability errors still propagate.
pub(crate) fn embed_with_retry(
    embedder: &ffagent_embeddings::CachedEmbedder,
    text: &str,
) -> AgentResult<Option<Vec<f32>>> {
    match embedder.embed(text) {
        Ok(v) => Ok(Some(v)),
        Err(first) if first.is_embedding_unavailable() => match embedder.embed(text) {
            Ok(v) => Ok(Some(v)),
            Err(second) if second.is_embedding_unavailable() => {
                tracing::debug!(error = %second, "row stored without embedding");
                Ok(None)
            }
            Err(other) => Err(other),
        },
        Err(other) => Err(other),
    }
}

/// Open the store at the given path, applying pending migrations.
pub fn open_store(path: &Path, config: &StorageConfig) -> AgentResult<Arc<ConnectionPool>> {
    let pool = ConnectionPool::open(path, config.read_pool_size)?;
    let version = pool.writer.with_conn_sync(migrations::run_migrations)?;
    info!(path = %path.display(), schema_version = version, "pattern store opened");
    Ok(Arc::new(pool))
}

/// Open an in-memory store (tests and ephemeral sessions). Reads are routed
/// through the write connection since in-memory databases are per-connection.
pub fn open_in_memory_store() -> AgentResult<Arc<ConnectionPool>> {
    let pool = ConnectionPool::open_in_memory()?;
    pool.writer.with_conn_sync(migrations::run_migrations)?;
    Ok(Arc::new(pool))
}
