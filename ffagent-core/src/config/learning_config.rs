use serde::{Deserialize, Serialize};

use super::defaults;

/// Learning-loop and maintenance configuration.
///
/// The decay/prune thresholds were hardcoded inconsistently across earlier
/// iterations of the agent; they are all explicit here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Success-rate increment on each successful reuse, capped at 1.0.
    pub success_bump: f64,
    /// Multiplicative success-rate decay for idle patterns (< 1.0).
    pub decay_factor: f64,
    /// Days without use before a pattern starts decaying.
    pub decay_idle_days: i64,
    /// Deletion rule: success rate below this floor...
    pub prune_success_floor: f64,
    /// ...combined with fewer executions than this.
    pub prune_min_executions: u64,
    /// Deletion rule: unused longer than this many days...
    pub stale_days: i64,
    /// ...combined with fewer executions than this.
    pub stale_min_executions: u64,
    /// Rows re-embedded per maintenance run.
    pub backfill_batch: usize,
    /// Recent outcomes retained in the bounded learning window.
    pub outcome_window: usize,
    /// Success rate below which a reseed is recommended.
    pub reseed_success_floor: f64,
    /// Minimum observed queries before the reseed signal can fire.
    pub reseed_min_queries: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            success_bump: defaults::DEFAULT_SUCCESS_BUMP,
            decay_factor: defaults::DEFAULT_DECAY_FACTOR,
            decay_idle_days: defaults::DEFAULT_DECAY_IDLE_DAYS,
            prune_success_floor: defaults::DEFAULT_PRUNE_SUCCESS_FLOOR,
            prune_min_executions: defaults::DEFAULT_PRUNE_MIN_EXECUTIONS,
            stale_days: defaults::DEFAULT_STALE_DAYS,
            stale_min_executions: defaults::DEFAULT_STALE_MIN_EXECUTIONS,
            backfill_batch: defaults::DEFAULT_BACKFILL_BATCH,
            outcome_window: defaults::DEFAULT_OUTCOME_WINDOW,
            reseed_success_floor: defaults::DEFAULT_RESEED_SUCCESS_FLOOR,
            reseed_min_queries: defaults::DEFAULT_RESEED_MIN_QUERIES,
        }
    }
}
