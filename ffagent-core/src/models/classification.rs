use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The backing store a query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetStore {
    /// The relational store (infrastructure, projects, measurements).
    Relational,
    /// The document store (personnel, real-time collections).
    Document,
}

/// Primary query intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryType {
    Personnel,
    Infrastructure,
    Project,
    Analytical,
    /// Both store types implied; context must carry hints for both.
    Hybrid,
    General,
}

/// Estimated query complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// Routing decision for a question. Ephemeral; recomputed per question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryClassification {
    pub query_type: QueryType,
    pub complexity: Complexity,
    /// Never empty: classification defaults to the relational store.
    pub target_stores: BTreeSet<TargetStore>,
    pub needs_cross_store_join: bool,
    pub is_analytical: bool,
    pub is_real_time: bool,
    /// Diagnostic score in 1..=10.
    pub complexity_score: u8,
}

impl QueryClassification {
    /// The primary store to try first.
    pub fn primary_store(&self) -> TargetStore {
        self.target_stores
            .iter()
            .next()
            .copied()
            .unwrap_or(TargetStore::Relational)
    }
}
