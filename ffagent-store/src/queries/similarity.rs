//! Brute-force vector similarity search over stored patterns.

use rusqlite::{params, Connection};
use tracing::debug;

use ffagent_core::errors::AgentResult;
use ffagent_core::models::ScoredPattern;

use crate::to_storage_err;
use crate::vector::{bytes_to_f32_vec, cosine_similarity};

/// Find the `limit` most similar patterns above `min_similarity`.
///
/// Scans every row whose success rate clears `min_success_rate` and whose
/// embedding was produced by `model` at the query's dimensionality; other
/// rows are skipped without deserializing the vector. The corpus is small
/// (thousands of patterns), so a linear scan beats maintaining an index.
pub fn search_similar(
    conn: &Connection,
    query_embedding: &[f32],
    model: &str,
    limit: usize,
    min_similarity: f64,
    min_success_rate: f64,
) -> AgentResult<Vec<ScoredPattern>> {
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(vec![]);
    }
    let query_len = query_embedding.len() as i64;

    let mut stmt = conn
        .prepare(
            "SELECT id, embedding, embedding_model, dimensions
             FROM query_patterns
             WHERE embedding IS NOT NULL AND success_rate >= ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![min_success_rate], |row| {
            let id: i64 = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let row_model: Option<String> = row.get(2)?;
            let dims: Option<i64> = row.get(3)?;
            Ok((id, blob, row_model, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut skipped = 0usize;
    let mut scored: Vec<(i64, f64)> = Vec::new();
    for row in rows {
        let (id, blob, row_model, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if row_model.as_deref() != Some(model) || dims != Some(query_len) {
            skipped += 1;
            continue;
        }
        let stored = bytes_to_f32_vec(&blob);
        let sim = cosine_similarity(query_embedding, &stored);
        if sim >= min_similarity {
            scored.push((id, sim));
        }
    }
    if skipped > 0 {
        debug!(skipped, model, "excluded patterns from other embedding models");
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    let mut results = Vec::with_capacity(scored.len());
    for (id, similarity) in scored {
        if let Some(pattern) = super::pattern_ops::get_by_id(conn, id)? {
            results.push(ScoredPattern {
                pattern,
                similarity,
            });
        }
    }
    Ok(results)
}
