//! Read-only connection pool.
//!
//! Context assembly fires several reads per question (similarity scan,
//! cautionary errors, schema hints), so reads rotate over a small set
//! of read-only connections instead of queueing behind the writer.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use ffagent_core::errors::{AgentError, AgentResult, StorageError};

use super::pragmas::{tune, Role};
use crate::to_storage_err;

/// Upper bound on the pool size.
const READERS_CAP: usize = 8;

/// Rotating pool of read-only connections to one database file.
pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `pool_size` read-only connections (clamped to 1..=8).
    pub fn open(path: &Path, pool_size: usize) -> AgentResult<Self> {
        let readers = (0..pool_size.clamp(1, READERS_CAP))
            .map(|_| open_reader(path))
            .collect::<AgentResult<Vec<_>>>()?;
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run a query on the next connection in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> AgentResult<T>
    where
        F: FnOnce(&Connection) -> AgentResult<T>,
    {
        let turn = self.cursor.fetch_add(1, Ordering::Relaxed);
        let slot = &self.readers[turn % self.readers.len()];
        match slot.lock() {
            Ok(conn) => f(&conn),
            Err(_) => Err(AgentError::from(StorageError::LockPoisoned {
                context: "read pool".to_string(),
            })),
        }
    }

    pub fn size(&self) -> usize {
        self.readers.len()
    }
}

fn open_reader(path: &Path) -> AgentResult<Mutex<Connection>> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    tune(&conn, Role::Reader)?;
    Ok(Mutex::new(conn))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("readers.db");
        let conn = Connection::open(&path).unwrap();
        tune(&conn, Role::Writer).unwrap();
        conn.execute_batch("CREATE TABLE t (n INTEGER); INSERT INTO t VALUES (7);")
            .unwrap();
        path
    }

    #[test]
    fn pool_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(&dir);
        assert_eq!(ReadPool::open(&path, 0).unwrap().size(), 1);
        assert_eq!(ReadPool::open(&path, 99).unwrap().size(), READERS_CAP);
    }

    #[test]
    fn rotation_serves_reads_from_every_connection() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(&dir);
        let pool = ReadPool::open(&path, 3).unwrap();
        for _ in 0..6 {
            let n = pool
                .with_conn(|conn| {
                    conn.query_row("SELECT n FROM t", [], |row| row.get::<_, i64>(0))
                        .map_err(|e| to_storage_err(e.to_string()))
                })
                .unwrap();
            assert_eq!(n, 7);
        }
    }

    #[test]
    fn readers_reject_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded_db(&dir);
        let pool = ReadPool::open(&path, 1).unwrap();
        let result = pool.with_conn(|conn| {
            conn.execute("INSERT INTO t VALUES (8)", [])
                .map_err(|e| to_storage_err(e.to_string()))
        });
        assert!(result.is_err());
    }
}
