use serde::{Deserialize, Serialize};

/// The result of executing a generated query, reported back by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub question: String,
    /// Raw generator output (SQL text or a document-store directive).
    pub generated_query: String,
    pub success: bool,
    /// Wall-clock execution time in seconds, when measured.
    pub execution_time: Option<f64>,
    pub error_message: Option<String>,
    /// A user-supplied corrected query, treated as a success record.
    pub correction: Option<String>,
}

impl QueryOutcome {
    pub fn success(question: &str, generated_query: &str, execution_time: f64) -> Self {
        Self {
            question: question.to_string(),
            generated_query: generated_query.to_string(),
            success: true,
            execution_time: Some(execution_time),
            error_message: None,
            correction: None,
        }
    }

    pub fn failure(question: &str, generated_query: &str, error_message: &str) -> Self {
        Self {
            question: question.to_string(),
            generated_query: generated_query.to_string(),
            success: false,
            execution_time: None,
            error_message: Some(error_message.to_string()),
            correction: None,
        }
    }

    pub fn with_correction(mut self, correction: &str) -> Self {
        self.correction = Some(correction.to_string());
        self
    }
}
