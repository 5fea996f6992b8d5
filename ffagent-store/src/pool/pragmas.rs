//! Connection tuning.
//!
//! The writer owns the database-level settings (WAL journal, NORMAL
//! sync, incremental auto_vacuum, foreign keys); readers only size
//! their own page cache and memory map. Embedding blobs dominate row
//! size here, so both profiles keep a generous mmap window for the
//! similarity scans.

use rusqlite::Connection;

use ffagent_core::errors::AgentResult;

use crate::to_storage_err;

/// Memory-map window. Sized so a full pattern corpus of embedding blobs
/// stays mapped during a scan.
const MMAP_BYTES: i64 = 256 * 1024 * 1024;

/// Page cache per connection; negative means KiB.
const PAGE_CACHE_KIB: i64 = -64_000;

/// How long a connection waits on a locked database before erroring.
const BUSY_TIMEOUT_MS: i64 = 5_000;

/// Tuning profile for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Writer,
    Reader,
}

/// Apply the pragma set for the connection's role.
pub fn tune(conn: &Connection, role: Role) -> AgentResult<()> {
    let mut sql = format!(
        "PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};
         PRAGMA cache_size = {PAGE_CACHE_KIB};
         PRAGMA mmap_size = {MMAP_BYTES};"
    );
    if role == Role::Writer {
        sql.push_str(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA auto_vacuum = INCREMENTAL;",
        );
    }
    conn.execute_batch(&sql)
        .map_err(|e| to_storage_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_profile_enables_wal() {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join("tuned.db")).unwrap();
        tune(&conn, Role::Writer).unwrap();

        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert!(mode.eq_ignore_ascii_case("wal"));
    }

    #[test]
    fn reader_profile_leaves_journal_mode_alone() {
        let conn = Connection::open_in_memory().unwrap();
        tune(&conn, Role::Reader).unwrap();

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, BUSY_TIMEOUT_MS);
    }
}
