//! Bounded window of recent outcomes and the reseed signal.

use std::collections::VecDeque;

use serde::Serialize;

/// Snapshot of learning activity.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LearningStats {
    /// Total outcomes observed since startup.
    pub total_observed: u64,
    pub successes: u64,
    pub failures: u64,
    pub corrections: u64,
    /// Corrections as a fraction of all observed outcomes.
    pub correction_rate: f64,
    /// Mean wall-clock execution time over outcomes that reported one.
    pub avg_execution_time: f64,
    /// Success fraction over the bounded recent window.
    pub recent_success_rate: f64,
    /// Outcomes currently held in the window.
    pub window_len: usize,
}

/// Ring buffer of recent outcome flags plus lifetime counters.
///
/// Memory use is bounded by the configured window size however long the
/// process runs; only the success bit is retained per outcome.
pub struct OutcomeWindow {
    window: VecDeque<bool>,
    capacity: usize,
    total_observed: u64,
    successes: u64,
    failures: u64,
    corrections: u64,
    timed_outcomes: u64,
    total_execution_time: f64,
}

impl OutcomeWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            total_observed: 0,
            successes: 0,
            failures: 0,
            corrections: 0,
            timed_outcomes: 0,
            total_execution_time: 0.0,
        }
    }

    pub fn record(&mut self, success: bool, corrected: bool, execution_time: Option<f64>) {
        self.total_observed += 1;
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        if corrected {
            self.corrections += 1;
        }
        if let Some(secs) = execution_time {
            self.timed_outcomes += 1;
            self.total_execution_time += secs;
        }
        if self.capacity == 0 {
            return;
        }
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(success);
    }

    pub fn stats(&self) -> LearningStats {
        let window_successes = self.window.iter().filter(|s| **s).count();
        let recent_success_rate = if self.window.is_empty() {
            1.0
        } else {
            window_successes as f64 / self.window.len() as f64
        };
        let correction_rate = if self.total_observed == 0 {
            0.0
        } else {
            self.corrections as f64 / self.total_observed as f64
        };
        let avg_execution_time = if self.timed_outcomes == 0 {
            0.0
        } else {
            self.total_execution_time / self.timed_outcomes as f64
        };
        LearningStats {
            total_observed: self.total_observed,
            successes: self.successes,
            failures: self.failures,
            corrections: self.corrections,
            correction_rate,
            avg_execution_time,
            recent_success_rate,
            window_len: self.window.len(),
        }
    }

    /// Whether recent quality has dropped enough to recommend reseeding
    /// the pattern store. Requires a minimum of observed queries so a
    /// cold start never fires the signal.
    pub fn should_reseed(&self, success_floor: f64, min_queries: usize) -> bool {
        self.total_observed as usize >= min_queries
            && self.stats().recent_success_rate < success_floor
    }
}
