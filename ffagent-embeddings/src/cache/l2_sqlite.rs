use std::path::Path;
use std::sync::Mutex;

use ffagent_core::errors::{AgentError, AgentResult, StorageError};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Persistent SQLite cache of embedding vectors.
///
/// One table keyed by the blake3 cache key. Vectors are stored as
/// little-endian f32 BLOBs. All access goes through a single mutexed
/// connection; the write volume here is batched and small.
pub struct L2SqliteCache {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS embedding_cache (
    key         TEXT PRIMARY KEY,
    model_id    TEXT NOT NULL,
    dimensions  INTEGER NOT NULL,
    embedding   BLOB NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
";

fn sqlite_err(e: rusqlite::Error) -> AgentError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
    .into()
}

fn poisoned(context: &str) -> AgentError {
    StorageError::LockPoisoned {
        context: context.to_string(),
    }
    .into()
}

fn vec_to_bytes(v: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(v.len() * 4);
    for x in v {
        out.extend_from_slice(&x.to_le_bytes());
    }
    out
}

fn bytes_to_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

impl L2SqliteCache {
    pub fn open(path: &Path) -> AgentResult<Self> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> AgentResult<Self> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> AgentResult<Self> {
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
            .map_err(sqlite_err)?;
        conn.execute_batch(SCHEMA).map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get(&self, key: &str) -> AgentResult<Option<Vec<f32>>> {
        let conn = self.conn.lock().map_err(|_| poisoned("l2 cache get"))?;
        let blob: Option<Vec<u8>> = conn
            .query_row(
                "SELECT embedding FROM embedding_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(sqlite_err)?;
        Ok(blob.map(|b| bytes_to_vec(&b)))
    }

    /// Write a batch of entries in a single transaction.
    pub fn insert_batch(&self, model_id: &str, entries: &[(String, Vec<f32>)]) -> AgentResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().map_err(|_| poisoned("l2 cache insert"))?;
        let tx = conn.transaction().map_err(sqlite_err)?;
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT OR REPLACE INTO embedding_cache (key, model_id, dimensions, embedding)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(sqlite_err)?;
            for (key, vec) in entries {
                stmt.execute(params![key, model_id, vec.len() as i64, vec_to_bytes(vec)])
                    .map_err(sqlite_err)?;
            }
        }
        tx.commit().map_err(sqlite_err)?;
        debug!(count = entries.len(), "flushed embeddings to L2 cache");
        Ok(())
    }

    pub fn entry_count(&self) -> AgentResult<u64> {
        let conn = self.conn.lock().map_err(|_| poisoned("l2 cache count"))?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM embedding_cache", [], |row| row.get(0))
            .map_err(sqlite_err)?;
        Ok(n as u64)
    }
}
