//! Rule-based query classification and routing.
//!
//! Decision order matters: personnel routing first, then infrastructure,
//! project and analytical signals. Questions touching both stores are
//! always classified `Hybrid` with a cross-store join, whatever type an
//! earlier rule assigned.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use ffagent_core::models::{
    Complexity, EntityDetectionResult, QueryClassification, QueryType, TargetStore,
};

static PERSONNEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:staff|employees?|technicians?|who installed|who worked|assigned to)\b")
        .expect("personnel keyword pattern")
});

static REAL_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:current(?:ly)?|now|active|real-time|live|ongoing)\b")
        .expect("real-time keyword pattern")
});

static JOIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:join|combine|match|correlate)\b").expect("join keyword pattern")
});

static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bprojects?\b").expect("project keyword pattern"));

/// Stateless rule-based classifier.
pub struct QueryClassifier;

impl QueryClassifier {
    /// Classify a question given its detected entities. Total function;
    /// the target store set is never empty.
    pub fn classify(question: &str, entities: &EntityDetectionResult) -> QueryClassification {
        let mut query_type = None;
        let mut stores: BTreeSet<TargetStore> = BTreeSet::new();
        let mut needs_join = false;
        let mut is_analytical = false;

        // Personnel questions live in the document store.
        if !entities.personnel.is_empty() || PERSONNEL_RE.is_match(question) {
            query_type = Some(QueryType::Personnel);
            stores.insert(TargetStore::Document);
        }

        // Physical plant, equipment and measurements are relational.
        if !entities.infrastructure.is_empty()
            || !entities.equipment.is_empty()
            || !entities.measurements.is_empty()
        {
            query_type = Some(match query_type {
                Some(QueryType::Personnel) => QueryType::Hybrid,
                _ => QueryType::Infrastructure,
            });
            stores.insert(TargetStore::Relational);
        }

        // Project scoping is relational.
        if !entities.project_codes.is_empty()
            || !entities.project_names.is_empty()
            || PROJECT_RE.is_match(question)
        {
            query_type.get_or_insert(QueryType::Project);
            stores.insert(TargetStore::Relational);
        }

        // Business metrics and aggregations mark analytical intent.
        if !entities.business.is_empty() || !entities.aggregations.is_empty() {
            is_analytical = true;
            query_type.get_or_insert(QueryType::Analytical);
        }

        let is_real_time = REAL_TIME_RE.is_match(question);

        let mut complexity = match entities.aggregations.len() {
            0 => Complexity::Simple,
            1 => Complexity::Moderate,
            _ => Complexity::Complex,
        };

        if JOIN_RE.is_match(question) {
            complexity = Complexity::Complex;
            needs_join = true;
        }

        if stores.is_empty() {
            stores.insert(TargetStore::Relational);
        }

        // Both stores implied means a hybrid query, regardless of which
        // rule fired first.
        if stores.len() > 1 {
            query_type = Some(QueryType::Hybrid);
            needs_join = true;
            complexity = Complexity::Complex;
        }

        let query_type = query_type.unwrap_or(QueryType::General);
        let complexity_score =
            complexity_score(entities, complexity, needs_join, is_analytical, &stores);

        QueryClassification {
            query_type,
            complexity,
            target_stores: stores,
            needs_cross_store_join: needs_join,
            is_analytical,
            is_real_time,
            complexity_score,
        }
    }
}

/// Diagnostic complexity score in 1..=10.
fn complexity_score(
    entities: &EntityDetectionResult,
    complexity: Complexity,
    needs_join: bool,
    is_analytical: bool,
    stores: &BTreeSet<TargetStore>,
) -> u8 {
    let mut score: u8 = 1;
    score += match complexity {
        Complexity::Simple => 0,
        Complexity::Moderate => 2,
        Complexity::Complex => 4,
    };
    if needs_join {
        score += 2;
    }
    score += entities.aggregations.len().min(10) as u8;
    if is_analytical {
        score += 1;
    }
    if stores.len() > 1 {
        score += 2;
    }
    score.min(10)
}
