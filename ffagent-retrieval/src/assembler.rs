//! The per-question context assembler.

use std::sync::Arc;

use ffagent_analysis::{EntityDetector, QueryClassifier};
use ffagent_core::models::QueryContext;
use ffagent_store::{ErrorPatternStore, PatternStore, SchemaCache};
use tracing::{debug, warn};

use crate::hints::domain_hints;

/// Assembles everything the query generator needs to answer a question.
///
/// Analysis (entities, classification, domain hints) is pure and always
/// present. Each retrieval source is independent; one failing leaves
/// its section empty and is logged, never surfaced to the caller.
pub struct ContextAssembler {
    detector: EntityDetector,
    patterns: Arc<PatternStore>,
    errors: Arc<ErrorPatternStore>,
    schema: Arc<SchemaCache>,
}

impl ContextAssembler {
    pub fn new(
        patterns: Arc<PatternStore>,
        errors: Arc<ErrorPatternStore>,
        schema: Arc<SchemaCache>,
    ) -> Self {
        Self {
            detector: EntityDetector::new(),
            patterns,
            errors,
            schema,
        }
    }

    /// Build the full context for a question. Infallible by design.
    pub fn assemble(&self, question: &str) -> QueryContext {
        let detected_entities = self.detector.detect(question);
        let classification = QueryClassifier::classify(question, &detected_entities);

        let similar_patterns = match self.patterns.find_similar(question) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "similar-pattern retrieval failed; continuing without");
                vec![]
            }
        };

        let cautionary_patterns = match self.errors.find_cautionary(question) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "error-pattern retrieval failed; continuing without");
                vec![]
            }
        };

        let schema_hints = match self.schema.relevant(question) {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "schema-hint retrieval failed; continuing without");
                vec![]
            }
        };

        let domain_hints = domain_hints(&detected_entities, &classification);

        debug!(
            similar = similar_patterns.len(),
            cautionary = cautionary_patterns.len(),
            schema = schema_hints.len(),
            query_type = ?classification.query_type,
            "context assembled"
        );

        QueryContext {
            question: question.to_string(),
            detected_entities,
            classification,
            similar_patterns,
            cautionary_patterns,
            schema_hints,
            domain_hints,
        }
    }
}
