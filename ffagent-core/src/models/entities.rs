use serde::{Deserialize, Serialize};

/// Entity categories recognized by the rule-based detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityCategory {
    Equipment,
    Measurements,
    Infrastructure,
    Business,
    Personnel,
    ProjectCodes,
    ProjectNames,
    StatusValues,
    Temporal,
    Numeric,
    Aggregations,
}

/// Entities detected in a question, one list per category.
///
/// Ephemeral; produced fresh per question and never persisted. A term may
/// appear in more than one category when it matches multiple vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDetectionResult {
    pub equipment: Vec<String>,
    pub measurements: Vec<String>,
    pub infrastructure: Vec<String>,
    pub business: Vec<String>,
    pub personnel: Vec<String>,
    pub project_codes: Vec<String>,
    pub project_names: Vec<String>,
    pub status_values: Vec<String>,
    pub temporal: Vec<String>,
    pub numeric: Vec<String>,
    pub aggregations: Vec<String>,
}

impl EntityDetectionResult {
    /// Whether no entity matched at all.
    pub fn is_empty(&self) -> bool {
        self.categories().is_empty()
    }

    /// The categories that matched at least one term, in a fixed order.
    pub fn categories(&self) -> Vec<EntityCategory> {
        let mut out = Vec::new();
        let pairs: [(&Vec<String>, EntityCategory); 11] = [
            (&self.equipment, EntityCategory::Equipment),
            (&self.measurements, EntityCategory::Measurements),
            (&self.infrastructure, EntityCategory::Infrastructure),
            (&self.business, EntityCategory::Business),
            (&self.personnel, EntityCategory::Personnel),
            (&self.project_codes, EntityCategory::ProjectCodes),
            (&self.project_names, EntityCategory::ProjectNames),
            (&self.status_values, EntityCategory::StatusValues),
            (&self.temporal, EntityCategory::Temporal),
            (&self.numeric, EntityCategory::Numeric),
            (&self.aggregations, EntityCategory::Aggregations),
        ];
        for (list, cat) in pairs {
            if !list.is_empty() {
                out.push(cat);
            }
        }
        out
    }
}
