//! Error-pattern recording, lookup and resolution.

use rusqlite::{params, Connection, Row};

use ffagent_core::constants::ERROR_PREFIX_LEN;
use ffagent_core::errors::AgentResult;
use ffagent_core::models::ErrorPattern;

use crate::to_storage_err;
use crate::vector::{bytes_to_f32_vec, cosine_similarity, f32_vec_to_bytes};

/// Deduplication prefix of an error message. Character-aligned so a
/// multi-byte message never splits a codepoint.
pub fn error_prefix(error_message: &str) -> &str {
    match error_message.char_indices().nth(ERROR_PREFIX_LEN) {
        Some((idx, _)) => &error_message[..idx],
        None => error_message,
    }
}

/// Record a failed generation. A repeat of the same (attempted query,
/// error prefix) pair bumps the occurrence count instead of inserting a
/// duplicate row; an existing question embedding is never downgraded to
/// NULL by a repeat recorded during a provider outage. Returns the row id.
pub fn record_failure(
    conn: &Connection,
    question: &str,
    attempted_query: &str,
    error_message: &str,
    embedding: Option<&[f32]>,
    embedding_model: Option<&str>,
) -> AgentResult<i64> {
    let prefix = error_prefix(error_message);
    let blob = embedding.map(f32_vec_to_bytes);
    let dims = embedding.map(|e| e.len() as i64);
    conn.execute(
        "INSERT INTO error_patterns
            (question, attempted_query, error_message, error_prefix,
             embedding, embedding_model, dimensions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(attempted_query, error_prefix) DO UPDATE SET
            occurrence_count = occurrence_count + 1,
            embedding = COALESCE(embedding, excluded.embedding),
            embedding_model = COALESCE(embedding_model, excluded.embedding_model),
            dimensions = COALESCE(dimensions, excluded.dimensions)",
        params![question, attempted_query, error_message, prefix, blob, embedding_model, dims],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let id: i64 = conn
        .query_row(
            "SELECT id FROM error_patterns WHERE attempted_query = ?1 AND error_prefix = ?2",
            params![attempted_query, prefix],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(id)
}

fn map_error_row(row: &Row<'_>) -> Result<ErrorPattern, rusqlite::Error> {
    let blob: Option<Vec<u8>> = row.get(4)?;
    let created_at: String = row.get(9)?;
    Ok(ErrorPattern {
        id: row.get(0)?,
        question: row.get(1)?,
        attempted_query: row.get(2)?,
        error_message: row.get(3)?,
        embedding: blob.map(|b| bytes_to_f32_vec(&b)),
        embedding_model: row.get(5)?,
        occurrence_count: row.get::<_, i64>(6)? as u64,
        resolved: row.get::<_, i64>(7)? != 0,
        resolution_query: row.get(8)?,
        created_at: super::parse_ts(9, &created_at)?,
    })
}

const ERROR_COLUMNS: &str = "id, question, attempted_query, error_message, \
     embedding, embedding_model, occurrence_count, resolved, \
     resolution_query, created_at";

/// The `limit` unresolved errors whose failing question is most similar
/// to the incoming one. These become cautionary context so the generator
/// avoids repeating mistakes relevant to this question, not merely the
/// globally most frequent ones. Rows without a vector, or with a vector
/// from another model or dimensionality, are skipped.
pub fn find_cautionary(
    conn: &Connection,
    query_embedding: &[f32],
    model: &str,
    limit: usize,
) -> AgentResult<Vec<ErrorPattern>> {
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(vec![]);
    }
    let query_len = query_embedding.len() as i64;

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ERROR_COLUMNS}, dimensions FROM error_patterns
             WHERE resolved = 0 AND embedding IS NOT NULL"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            let dims: Option<i64> = row.get(10)?;
            Ok((map_error_row(row)?, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(f64, ErrorPattern)> = Vec::new();
    for row in rows {
        let (pattern, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if pattern.embedding_model.as_deref() != Some(model) || dims != Some(query_len) {
            continue;
        }
        let stored = match &pattern.embedding {
            Some(v) => v,
            None => continue,
        };
        let sim = cosine_similarity(query_embedding, stored);
        scored.push((sim, pattern));
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored.into_iter().map(|(_, p)| p).collect())
}

/// Unresolved errors whose question vector is missing or was produced by
/// another model, oldest first, for backfill.
pub fn errors_needing_embedding(
    conn: &Connection,
    model: &str,
    limit: usize,
) -> AgentResult<Vec<(i64, String)>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, question FROM error_patterns
             WHERE resolved = 0 AND (embedding IS NULL OR embedding_model <> ?1)
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
        "UPDATE error_patterns
         SET embedding = ?2, embedding_model = ?3, dimensions = ?4
         WHERE id = ?1",
        params![id, f32_vec_to_bytes(embedding), model, embedding.len() as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Mark every error recorded against `attempted_query` as resolved by the
/// given correction. Returns the number of rows updated.
pub fn resolve_by_query(
    conn: &Connection,
    attempted_query: &str,
    resolution_query: &str,
) -> AgentResult<usize> {
    conn.execute(
        "UPDATE error_patterns
         SET resolved = 1, resolution_query = ?2
         WHERE attempted_query = ?1 AND resolved = 0",
        params![attempted_query, resolution_query],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn count_unresolved(conn: &Connection) -> AgentResult<u64> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM error_patterns WHERE resolved = 0",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as u64)
}
