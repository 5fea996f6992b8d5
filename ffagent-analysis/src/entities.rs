//! Telecom entity detection.
//!
//! Vocabulary terms match on word boundaries with a plural tolerance, so
//! "drops" matches the term "drop" while "dbm" never matches inside
//! "database". Project codes match by prefix (LAW-001, MAM12); project
//! names also match when spelled out.

use regex::Regex;

use ffagent_core::models::EntityDetectionResult;

const EQUIPMENT: &[&str] = &[
    "olt", "onu", "ont", "splitter", "pon", "gpon", "nokia", "fiber", "fibre",
];
const MEASUREMENTS: &[&str] = &[
    "optical power",
    "splice loss",
    "attenuation",
    "dbm",
    "db",
    "signal strength",
];
const INFRASTRUCTURE: &[&str] = &[
    "drop", "pole", "fibre", "cable", "duct", "chamber", "closure", "splice",
];
const BUSINESS: &[&str] = &[
    "take rate",
    "homes passed",
    "penetration",
    "churn",
    "arpu",
    "installation",
    "activation",
];
const PERSONNEL: &[&str] = &[
    "technician",
    "installer",
    "field agent",
    "staff",
    "employee",
    "team",
    "crew",
];
const STATUS_VALUES: &[&str] = &[
    "active",
    "inactive",
    "pending",
    "installed",
    "not installed",
    "completed",
    "in progress",
    "scheduled",
    "cancelled",
];
const AGGREGATIONS: &[&str] = &[
    "count", "sum", "average", "avg", "total", "max", "min", "group by",
];

/// (code prefix pattern, canonical project name)
///
/// The trailing boundary keeps a bare prefix from matching inside the
/// project name itself ("Law" in "Lawley").
const PROJECT_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)\bLAW[\d-]*\b", "Lawley"),
    (r"(?i)\bIVY[\d-]*\b", "Ivory Park"),
    (r"(?i)\bMAM[\d-]*\b", "Mamelodi"),
    (r"(?i)\bMOH[\d-]*\b", "Mohadin"),
    (r"(?i)\bHEIN[\d-]*\b", "Hein Test"),
];

const TEMPORAL_PATTERNS: &[&str] = &[
    r"\b\d{4}-\d{2}-\d{2}\b",
    r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
    r"\b(?:today|yesterday|tomorrow)\b",
    r"\b(?:this|last|next)\s+(?:week|month|year|quarter)\b",
    r"\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
    r"\b\d+\s+(?:days?|weeks?|months?|years?)\s+ago\b",
];

const NUMERIC_PATTERNS: &[&str] = &[
    r"\btop\s+\d+\b",
    r"\b(?:more|less|greater|fewer)\s+than\s+\d+\b",
    r"\bbetween\s+\d+\s+and\s+\d+\b",
    r"\b\d+\b",
];

/// One vocabulary term compiled into a boundary-anchored matcher.
struct Term {
    canonical: &'static str,
    re: Regex,
}

/// Rule-based entity detector over the telecom vocabularies.
pub struct EntityDetector {
    equipment: Vec<Term>,
    measurements: Vec<Term>,
    infrastructure: Vec<Term>,
    business: Vec<Term>,
    personnel: Vec<Term>,
    status_values: Vec<Term>,
    aggregations: Vec<Term>,
    project_codes: Vec<(Regex, &'static str)>,
    project_names: Vec<(Regex, &'static str)>,
    temporal: Vec<Regex>,
    numeric: Vec<Regex>,
}

/// Compile a vocabulary term into a word-boundary matcher that also
/// accepts a simple plural ("drop" matches "drops"). Multi-word terms
/// tolerate any whitespace run between words.
fn term_regex(term: &str) -> Regex {
    let words: Vec<String> = term.split_whitespace().map(regex::escape).collect();
    let pattern = format!(r"(?i)\b{}(?:s|es)?\b", words.join(r"\s+"));
    Regex::new(&pattern).expect("vocabulary term pattern")
}

fn compile_terms(terms: &[&'static str]) -> Vec<Term> {
    terms
        .iter()
        .map(|t| Term {
            canonical: t,
            re: term_regex(t),
        })
        .collect()
}

fn matched_terms(terms: &[Term], question: &str) -> Vec<String> {
    terms
        .iter()
        .filter(|t| t.re.is_match(question))
        .map(|t| t.canonical.to_string())
        .collect()
}

impl EntityDetector {
    pub fn new() -> Self {
        Self {
            equipment: compile_terms(EQUIPMENT),
            measurements: compile_terms(MEASUREMENTS),
            infrastructure: compile_terms(INFRASTRUCTURE),
            business: compile_terms(BUSINESS),
            personnel: compile_terms(PERSONNEL),
            status_values: compile_terms(STATUS_VALUES),
            aggregations: compile_terms(AGGREGATIONS),
            project_codes: PROJECT_PATTERNS
                .iter()
                .map(|(p, name)| (Regex::new(p).expect("project code pattern"), *name))
                .collect(),
            project_names: PROJECT_PATTERNS
                .iter()
                .map(|(_, name)| (term_regex(&name.to_lowercase()), *name))
                .collect(),
            temporal: TEMPORAL_PATTERNS
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("temporal pattern"))
                .collect(),
            numeric: NUMERIC_PATTERNS
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("numeric pattern"))
                .collect(),
        }
    }

    /// Detect every entity in the question. Deterministic and total.
    pub fn detect(&self, question: &str) -> EntityDetectionResult {
        let mut result = EntityDetectionResult {
            equipment: matched_terms(&self.equipment, question),
            measurements: matched_terms(&self.measurements, question),
            infrastructure: matched_terms(&self.infrastructure, question),
            business: matched_terms(&self.business, question),
            personnel: matched_terms(&self.personnel, question),
            status_values: matched_terms(&self.status_values, question),
            aggregations: matched_terms(&self.aggregations, question),
            ..Default::default()
        };

        for (re, name) in &self.project_codes {
            let mut matched = false;
            for m in re.find_iter(question) {
                result.project_codes.push(m.as_str().to_uppercase());
                matched = true;
            }
            if matched {
                result.project_names.push(name.to_string());
            }
        }
        for (re, name) in &self.project_names {
            if re.is_match(question) && !result.project_names.iter().any(|n| n == name) {
                result.project_names.push(name.to_string());
            }
        }
        result.project_codes.sort();
        result.project_codes.dedup();

        for re in &self.temporal {
            if let Some(m) = re.find(question) {
                result.temporal.push(m.as_str().to_lowercase());
            }
        }

        for re in &self.numeric {
            for m in re.find_iter(question) {
                result.numeric.push(m.as_str().to_lowercase());
            }
        }

        result
    }
}

impl Default for EntityDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(question: &str) -> EntityDetectionResult {
        EntityDetector::new().detect(question)
    }

    #[test]
    fn equipment_and_measurement_terms() {
        let r = detect("Show optical power for the Nokia OLT");
        assert_eq!(r.measurements, vec!["optical power"]);
        assert!(r.equipment.contains(&"nokia".to_string()));
        assert!(r.equipment.contains(&"olt".to_string()));
    }

    #[test]
    fn plural_forms_match_singular_vocabulary() {
        let r = detect("How many drops and poles were installed");
        assert!(r.infrastructure.contains(&"drop".to_string()));
        assert!(r.infrastructure.contains(&"pole".to_string()));
        assert!(r.status_values.contains(&"installed".to_string()));
    }

    #[test]
    fn short_terms_never_match_inside_words() {
        // "db" must not match inside "database", "pon" not inside "response".
        let r = detect("store the response in the database");
        assert!(r.measurements.is_empty());
        assert!(r.equipment.is_empty());
    }

    #[test]
    fn project_codes_carry_their_names() {
        let r = detect("Show optical power for drop LAW-001");
        assert_eq!(r.project_codes, vec!["LAW-001"]);
        assert_eq!(r.project_names, vec!["Lawley"]);
    }

    #[test]
    fn project_names_match_spelled_out() {
        let r = detect("Calculate average splice loss for the Mamelodi project");
        assert!(r.project_codes.is_empty());
        assert_eq!(r.project_names, vec!["Mamelodi"]);
        assert_eq!(r.measurements, vec!["splice loss"]);
        assert!(r.aggregations.contains(&"average".to_string()));
    }

    #[test]
    fn multi_word_project_names() {
        let r = detect("Which staff worked in Ivory Park last month?");
        assert_eq!(r.project_names, vec!["Ivory Park"]);
        assert!(!r.temporal.is_empty());
        assert!(r.personnel.contains(&"staff".to_string()));
    }

    #[test]
    fn temporal_and_numeric_references() {
        let r = detect("Show me the top 10 poles added 3 days ago");
        assert!(r.temporal.iter().any(|t| t == "3 days ago"));
        assert!(r.numeric.iter().any(|n| n == "top 10"));
        assert!(r.numeric.iter().any(|n| n == "10"));
    }

    #[test]
    fn aggregation_keywords() {
        let r = detect("Count the total drops grouped by project");
        assert!(r.aggregations.contains(&"count".to_string()));
        assert!(r.aggregations.contains(&"total".to_string()));
    }

    #[test]
    fn no_entities_in_unrelated_text() {
        let r = detect("hello there");
        assert!(r.is_empty());
    }

    #[test]
    fn detection_is_deterministic() {
        let d = EntityDetector::new();
        let q = "Which technician installed drops in Lawley this week?";
        assert_eq!(d.detect(q), d.detect(q));
    }
}
