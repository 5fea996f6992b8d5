//! Pattern seeding from schema hints.
//!
//! Bootstraps an empty store with template question/query pairs for each
//! known table so the very first real questions already find examples.
//! Table and column names are interpolated into SQL text, so they must
//! pass the identifier allow-list; anything else is skipped and counted.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use ffagent_core::constants::MAX_SEED_BATCH_SIZE;
use ffagent_core::errors::AgentResult;
use ffagent_core::models::SchemaHint;
use tracing::{info, warn};

use crate::engine::LearningEngine;

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Seeded patterns are templates, not observed behaviour; they carry a
/// reduced confidence so production observations outrank them.
const SEED_CONFIDENCE: f64 = 0.5;

/// Counts from one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: usize,
    /// Hints rejected by the identifier allow-list.
    pub skipped: usize,
}

/// Template pairs for one table.
fn table_templates(table: &str) -> Vec<(String, String)> {
    vec![
        (
            format!("Show all {table}"),
            format!("SELECT * FROM {table} LIMIT 100"),
        ),
        (
            format!("How many {table} are there?"),
            format!("SELECT COUNT(*) FROM {table}"),
        ),
        (
            format!("Show the latest {table}"),
            format!("SELECT * FROM {table} ORDER BY created_at DESC LIMIT 100"),
        ),
    ]
}

/// Template pairs for one (table, column).
fn column_templates(table: &str, column: &str) -> Vec<(String, String)> {
    vec![(
        format!("Break down {table} by {column}"),
        format!("SELECT {column}, COUNT(*) FROM {table} GROUP BY {column}"),
    )]
}

/// Seed the pattern store from schema hints.
///
/// Within one run identical queries are generated once; re-running over
/// the same schema folds into the existing rows via the learning upsert.
pub fn seed_from_hints(engine: &LearningEngine, hints: &[SchemaHint]) -> AgentResult<SeedReport> {
    let mut report = SeedReport::default();
    let mut seen: HashSet<[u8; 32]> = HashSet::new();

    for hint in hints {
        if !IDENT_RE.is_match(&hint.table_name) {
            warn!(table = %hint.table_name, "skipping hint with unsafe table name");
            report.skipped += 1;
            continue;
        }
        let templates = match &hint.column_name {
            Some(column) if !IDENT_RE.is_match(column) => {
                warn!(
                    table = %hint.table_name,
                    column = %column,
                    "skipping hint with unsafe column name"
                );
                report.skipped += 1;
                continue;
            }
            Some(column) => column_templates(&hint.table_name, column),
            None => table_templates(&hint.table_name),
        };

        for (question, query) in templates {
            if report.seeded >= MAX_SEED_BATCH_SIZE {
                warn!(limit = MAX_SEED_BATCH_SIZE, "seed batch limit reached");
                info!(seeded = report.seeded, skipped = report.skipped, "seeding complete");
                return Ok(report);
            }
            if !seen.insert(*blake3::hash(query.as_bytes()).as_bytes()) {
                continue;
            }
            engine.patterns().upsert(
                &question,
                &query,
                None,
                serde_json::json!({ "source": "seed", "confidence": SEED_CONFIDENCE }),
            )?;
            report.seeded += 1;
        }
    }

    info!(seeded = report.seeded, skipped = report.skipped, "seeding complete");
    Ok(report)
}
