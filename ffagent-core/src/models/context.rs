use serde::{Deserialize, Serialize};

use crate::models::{
    EntityDetectionResult, ErrorPattern, QueryClassification, QueryPattern, SchemaHint,
};

/// A retrieved pattern with its cosine similarity to the question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPattern {
    pub pattern: QueryPattern,
    pub similarity: f64,
}

/// Everything the external query generator needs for one question.
///
/// Assembled by the Context Assembler; the retrieval lists may be empty
/// either because nothing matched or because retrieval degraded on an
/// embedding/storage failure; callers are not expected to distinguish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryContext {
    pub question: String,
    pub detected_entities: EntityDetectionResult,
    pub classification: QueryClassification,
    /// Prior successful patterns, most similar first.
    pub similar_patterns: Vec<ScoredPattern>,
    /// Prior failures to avoid, most similar first.
    pub cautionary_patterns: Vec<ErrorPattern>,
    /// Schema rows relevant to the question's terms.
    pub schema_hints: Vec<SchemaHint>,
    /// Fixed explanatory fragments keyed off the detected entities.
    pub domain_hints: Vec<String>,
}
