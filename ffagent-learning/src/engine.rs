//! Outcome recording.

use std::sync::{Arc, Mutex};

use ffagent_core::config::LearningConfig;
use ffagent_core::errors::AgentResult;
use ffagent_core::models::{GeneratedQuery, QueryOutcome, TargetStore};
use ffagent_store::{ErrorPatternStore, PatternStore};
use tracing::{debug, info};

use crate::stats::{LearningStats, OutcomeWindow};

/// Records query outcomes into the pattern and error stores.
pub struct LearningEngine {
    patterns: Arc<PatternStore>,
    errors: Arc<ErrorPatternStore>,
    window: Mutex<OutcomeWindow>,
    config: LearningConfig,
}

impl LearningEngine {
    pub fn new(
        patterns: Arc<PatternStore>,
        errors: Arc<ErrorPatternStore>,
        config: LearningConfig,
    ) -> Self {
        Self {
            patterns,
            errors,
            window: Mutex::new(OutcomeWindow::new(config.outcome_window)),
            config,
        }
    }

    /// Record one executed query's outcome.
    ///
    /// Success reinforces (or creates) the pattern. Failure records an
    /// error pattern. A correction stores the corrected query as a
    /// success and resolves every error recorded against the original.
    pub fn record_outcome(&self, outcome: &QueryOutcome) -> AgentResult<()> {
        if let Ok(mut window) = self.window.lock() {
            window.record(
                outcome.success || outcome.correction.is_some(),
                outcome.correction.is_some(),
                outcome.execution_time,
            );
        }

        if outcome.success {
            let store = match GeneratedQuery::parse(&outcome.generated_query).target_store() {
                TargetStore::Relational => "relational",
                TargetStore::Document => "document",
            };
            self.patterns.upsert(
                &outcome.question,
                &outcome.generated_query,
                outcome.execution_time,
                serde_json::json!({ "source": "production", "store": store }),
            )?;
            debug!(question = %outcome.question, "reinforced pattern");
        } else {
            let error = outcome.error_message.as_deref().unwrap_or("unknown error");
            self.errors
                .record_failure(&outcome.question, &outcome.generated_query, error)?;
            debug!(question = %outcome.question, "recorded failure");
        }

        if let Some(correction) = &outcome.correction {
            self.patterns.upsert(
                &outcome.question,
                correction,
                None,
                serde_json::json!({
                    "source": "user-correction",
                    "corrects": outcome.generated_query,
                }),
            )?;
            let resolved = self.errors.resolve(&outcome.generated_query, correction)?;
            info!(
                question = %outcome.question,
                resolved_errors = resolved,
                "learned user correction"
            );
        }

        Ok(())
    }

    pub fn stats(&self) -> LearningStats {
        match self.window.lock() {
            Ok(window) => window.stats(),
            Err(poisoned) => poisoned.into_inner().stats(),
        }
    }

    /// Whether recent outcome quality recommends reseeding.
    pub fn should_reseed(&self) -> bool {
        match self.window.lock() {
            Ok(window) => window.should_reseed(
                self.config.reseed_success_floor,
                self.config.reseed_min_queries,
            ),
            Err(_) => false,
        }
    }

    pub(crate) fn patterns(&self) -> &Arc<PatternStore> {
        &self.patterns
    }

    pub(crate) fn errors(&self) -> &Arc<ErrorPatternStore> {
        &self.errors
    }
}
