//! v001: query_patterns, error_patterns, schema_hints.

use rusqlite::Connection;

use ffagent_core::errors::AgentResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AgentResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS query_patterns (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            question            TEXT NOT NULL,
            generated_query     TEXT NOT NULL UNIQUE,
            embedding           BLOB,
            embedding_model     TEXT,
            dimensions          INTEGER,
            success_rate        REAL NOT NULL DEFAULT 1.0,
            execution_count     INTEGER NOT NULL DEFAULT 1,
            avg_execution_time  REAL NOT NULL DEFAULT 0.0,
            last_used           TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            created_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            last_decayed        TEXT,
            metadata            TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_patterns_success ON query_patterns(success_rate);
        CREATE INDEX IF NOT EXISTS idx_patterns_last_used ON query_patterns(last_used);

        CREATE TABLE IF NOT EXISTS error_patterns (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            question          TEXT NOT NULL,
            attempted_query   TEXT NOT NULL,
            error_message     TEXT NOT NULL,
            error_prefix      TEXT NOT NULL,
            embedding         BLOB,
            embedding_model   TEXT,
            dimensions        INTEGER,
            occurrence_count  INTEGER NOT NULL DEFAULT 1,
            resolved          INTEGER NOT NULL DEFAULT 0,
            resolution_query  TEXT,
            created_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_errors_dedup
            ON error_patterns(attempted_query, error_prefix);
        CREATE INDEX IF NOT EXISTS idx_errors_resolved ON error_patterns(resolved);

        CREATE TABLE IF NOT EXISTS schema_hints (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            table_name   TEXT NOT NULL,
            column_name  TEXT,
            description  TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_hints_identity
            ON schema_hints(table_name, IFNULL(column_name, ''));
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
