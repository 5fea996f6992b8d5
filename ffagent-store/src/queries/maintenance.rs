//! Decay and pruning of the pattern corpus.

use chrono::{Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use ffagent_core::errors::AgentResult;

use crate::to_storage_err;

/// Multiply the success rate of idle patterns by `factor`.
///
/// A pattern is idle when unused for `idle_days`. The `last_decayed`
/// column limits decay to once per calendar day, so repeated maintenance
/// runs are idempotent within a day. Returns the number of rows decayed.
pub fn decay_idle(conn: &Connection, factor: f64, idle_days: i64) -> AgentResult<usize> {
    let cutoff = (Utc::now() - Duration::days(idle_days))
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let today = Utc::now().format("%Y-%m-%d").to_string();
    conn.execute(
        "UPDATE query_patterns
         SET success_rate = success_rate * ?1,
             last_decayed = ?3
         WHERE last_used < ?2
           AND IFNULL(last_decayed, '') < ?3",
        params![factor, cutoff, today],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Delete patterns that failed early: low success rate and never enough
/// executions to establish themselves. Returns rows deleted.
pub fn prune_low_quality(
    conn: &Connection,
    success_floor: f64,
    max_executions: u64,
) -> AgentResult<usize> {
    conn.execute(
        "DELETE FROM query_patterns
         WHERE success_rate < ?1 AND execution_count < ?2",
        params![success_floor, max_executions as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Delete patterns that never took hold: long unused and rarely executed.
/// Returns rows deleted.
pub fn prune_stale(
    conn: &Connection,
    stale_days: i64,
    max_executions: u64,
) -> AgentResult<usize> {
    let cutoff = (Utc::now() - Duration::days(stale_days))
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    conn.execute(
        "DELETE FROM query_patterns
         WHERE last_used < ?1 AND execution_count < ?2",
        params![cutoff, max_executions as i64],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
