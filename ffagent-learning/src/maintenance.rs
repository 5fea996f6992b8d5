//! Periodic maintenance over the pattern corpus.

use ffagent_core::errors::AgentResult;
use tracing::info;

use crate::engine::LearningEngine;

/// Counts from one maintenance pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub decayed: usize,
    pub pruned_low_quality: usize,
    pub pruned_stale: usize,
    pub backfilled: usize,
    /// Error patterns whose question vector was repaired.
    pub backfilled_errors: usize,
}

/// Run decay, pruning and embedding backfill in one pass.
///
/// Safe to schedule daily; decay applies at most once per day per
/// pattern and the other steps are naturally idempotent.
pub fn run_maintenance(engine: &LearningEngine) -> AgentResult<MaintenanceReport> {
    let decay = engine.patterns().decay_and_prune()?;
    let backfilled = engine.patterns().backfill_embeddings()?;
    let backfilled_errors = engine.errors().backfill_embeddings()?;

    let report = MaintenanceReport {
        decayed: decay.decayed,
        pruned_low_quality: decay.pruned_low_quality,
        pruned_stale: decay.pruned_stale,
        backfilled,
        backfilled_errors,
    };
    info!(
        decayed = report.decayed,
        pruned_low_quality = report.pruned_low_quality,
        pruned_stale = report.pruned_stale,
        backfilled = report.backfilled,
        backfilled_errors = report.backfilled_errors,
        "maintenance pass complete"
    );
    Ok(report)
}
