//! Domain hints derived from entities and classification.
//!
//! Short declarative lines the query generator appends to its context:
//! column conventions for measurements, prefix filtering for projects,
//! aggregation hygiene for analytical questions.

use ffagent_core::models::{EntityDetectionResult, QueryClassification, TargetStore};

pub fn domain_hints(
    entities: &EntityDetectionResult,
    classification: &QueryClassification,
) -> Vec<String> {
    let mut hints = Vec::new();

    if entities.measurements.iter().any(|m| m == "optical power") {
        hints.push(
            "Optical power is stored in the optical_power_db column, measured in dBm".to_string(),
        );
    }
    if entities.measurements.iter().any(|m| m == "splice loss") {
        hints.push(
            "Splice loss is stored in the splice_loss_db column; acceptable range 0.1-0.5 dB"
                .to_string(),
        );
    }

    if !entities.project_codes.is_empty() || !entities.project_names.is_empty() {
        hints.push(
            "Project codes are prefixes in drop_number and pole_number columns".to_string(),
        );
        for code in &entities.project_codes {
            let prefix: String = code.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
            hints.push(format!("Filter by project with LIKE '{prefix}%'"));
        }
    }

    if classification.is_analytical {
        hints.push("Use DATE_TRUNC for time-based grouping".to_string());
        hints.push("Include NULL checks for aggregations; COALESCE missing values".to_string());
    }

    if classification.target_stores.contains(&TargetStore::Document) {
        hints.push(
            "Personnel and real-time data live in the document store; answer with a \
             FIREBASE_QUERY directive"
                .to_string(),
        );
    }

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffagent_analysis::{EntityDetector, QueryClassifier};

    fn hints_for(question: &str) -> Vec<String> {
        let entities = EntityDetector::new().detect(question);
        let classification = QueryClassifier::classify(question, &entities);
        domain_hints(&entities, &classification)
    }

    #[test]
    fn measurement_hints_name_the_columns() {
        let hints = hints_for("Show optical power for drop LAW-001");
        assert!(hints.iter().any(|h| h.contains("optical_power_db")));
        assert!(hints.iter().any(|h| h.contains("LIKE 'LAW%'")));
    }

    #[test]
    fn analytical_questions_get_aggregation_hygiene() {
        let hints = hints_for("Average splice loss per month");
        assert!(hints.iter().any(|h| h.contains("DATE_TRUNC")));
        assert!(hints.iter().any(|h| h.contains("splice_loss_db")));
    }

    #[test]
    fn personnel_questions_get_the_document_store_hint() {
        let hints = hints_for("List all staff");
        assert!(hints.iter().any(|h| h.contains("FIREBASE_QUERY")));
    }

    #[test]
    fn plain_questions_get_no_hints() {
        assert!(hints_for("hello there").is_empty());
    }
}
