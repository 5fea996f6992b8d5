//! Query-pattern CRUD and the learning upsert.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use ffagent_core::errors::AgentResult;
use ffagent_core::models::QueryPattern;

use crate::to_storage_err;
use crate::vector::{bytes_to_f32_vec, f32_vec_to_bytes};

/// New-pattern payload for [`upsert_pattern`].
pub struct NewPattern<'a> {
    pub question: &'a str,
    pub generated_query: &'a str,
    pub embedding: Option<&'a [f32]>,
    pub embedding_model: Option<&'a str>,
    pub execution_time: Option<f64>,
    pub metadata: &'a serde_json::Value,
}

/// Insert a pattern or, when the exact generated query already exists,
/// fold the new observation into it: bump the execution count, advance
/// the running execution-time average, nudge the success rate up (capped
/// at 1.0) and refresh `last_used`. An existing embedding is kept so a
/// re-observation never downgrades a vector to NULL.
///
/// Returns the pattern's row id.
pub fn upsert_pattern(conn: &Connection, p: &NewPattern<'_>, success_bump: f64) -> AgentResult<i64> {
    let blob = p.embedding.map(f32_vec_to_bytes);
    let dims = p.embedding.map(|e| e.len() as i64);
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let metadata = p.metadata.to_string();

    conn.execute(
        "INSERT INTO query_patterns
            (question, generated_query, embedding, embedding_model, dimensions,
             avg_execution_time, last_used, metadata)
         VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, 0.0), ?7, ?8)
         ON CONFLICT(generated_query) DO UPDATE SET
            avg_execution_time = CASE
                WHEN ?6 IS NULL THEN avg_execution_time
                ELSE (avg_execution_time * execution_count + ?6) / (execution_count + 1)
            END,
            execution_count = execution_count + 1,
            success_rate = MIN(success_rate + ?9, 1.0),
            embedding = COALESCE(embedding, excluded.embedding),
            embedding_model = COALESCE(embedding_model, excluded.embedding_model),
            dimensions = COALESCE(dimensions, excluded.dimensions),
            last_used = ?7",
        params![
            p.question,
            p.generated_query,
            blob,
            p.embedding_model,
            dims,
            p.execution_time,
            now,
            metadata,
            success_bump,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let id: i64 = conn
        .query_row(
            "SELECT id FROM query_patterns WHERE generated_query = ?1",
            params![p.generated_query],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(id)
}

/// Map a full `query_patterns` row into the model type.
pub(crate) fn map_pattern_row(row: &Row<'_>) -> Result<QueryPattern, rusqlite::Error> {
    let blob: Option<Vec<u8>> = row.get(3)?;
    let last_used: String = row.get(8)?;
    let created_at: String = row.get(9)?;
    let metadata: String = row.get(10)?;
    Ok(QueryPattern {
        id: row.get(0)?,
        question: row.get(1)?,
        generated_query: row.get(2)?,
        embedding: blob.map(|b| bytes_to_f32_vec(&b)),
        embedding_model: row.get(4)?,
        success_rate: row.get(5)?,
        execution_count: row.get::<_, i64>(6)? as u64,
        avg_execution_time: row.get(7)?,
        last_used: super::parse_ts(8, &last_used)?,
        created_at: super::parse_ts(9, &created_at)?,
        metadata: serde_json::from_str(&metadata).unwrap_or(serde_json::Value::Null),
    })
}

pub(crate) const PATTERN_COLUMNS: &str = "id, question, generated_query, embedding, \
     embedding_model, success_rate, execution_count, avg_execution_time, \
     last_used, created_at, metadata";

pub fn get_by_id(conn: &Connection, id: i64) -> AgentResult<Option<QueryPattern>> {
    conn.query_row(
        &format!("SELECT {PATTERN_COLUMNS} FROM query_patterns WHERE id = ?1"),
        params![id],
        map_pattern_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn get_by_query(conn: &Connection, generated_query: &str) -> AgentResult<Option<QueryPattern>> {
    conn.query_row(
        &format!("SELECT {PATTERN_COLUMNS} FROM query_patterns WHERE generated_query = ?1"),
        params![generated_query],
        map_pattern_row,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Patterns whose vector is missing or was produced by another model,
/// oldest first, for backfill.
pub fn patterns_needing_embedding(
    conn: &Connection,
    model: &str,
    limit: usize,
) -> AgentResult<Vec<(i64, String)>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, question FROM query_patterns
             WHERE embedding IS NULL OR embedding_model <> ?1
             ORDER BY id ASC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![model, limit as i64], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn set_embedding(
    conn: &Connection,
    id: i64,
    embedding: &[f32],
    model: &str,
) -> AgentResult<()> {
    conn.execute(
        "UPDATE query_patterns
         SET embedding = ?2, embedding_model = ?3, dimensions = ?4
         WHERE id = ?1",
        params![id, f32_vec_to_bytes(embedding), model, embedding.len() as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn count(conn: &Connection) -> AgentResult<u64> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM query_patterns", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as u64)
}
