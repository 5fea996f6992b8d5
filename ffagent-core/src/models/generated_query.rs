use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DOCUMENT_QUERY_PREFIX;
use crate::models::TargetStore;

/// A generated query tagged with its target store.
///
/// The query generator historically signalled document-store routing with a
/// `FIREBASE_QUERY: collection` text directive; `parse` absorbs that at the
/// boundary so downstream code matches on a closed variant instead of
/// sniffing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedQuery {
    /// SQL text for the relational store.
    Sql(String),
    /// A collection query for the document store.
    Document {
        collection: String,
        filter: Option<String>,
    },
}

impl GeneratedQuery {
    /// Classify raw generator output.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix(DOCUMENT_QUERY_PREFIX) {
            let rest = rest.trim();
            match rest.split_once(char::is_whitespace) {
                Some((collection, filter)) => GeneratedQuery::Document {
                    collection: collection.to_string(),
                    filter: Some(filter.trim().to_string()),
                },
                None => GeneratedQuery::Document {
                    collection: rest.to_string(),
                    filter: None,
                },
            }
        } else {
            GeneratedQuery::Sql(trimmed.to_string())
        }
    }

    /// The store this query executes against.
    pub fn target_store(&self) -> TargetStore {
        match self {
            GeneratedQuery::Sql(_) => TargetStore::Relational,
            GeneratedQuery::Document { .. } => TargetStore::Document,
        }
    }
}

impl fmt::Display for GeneratedQuery {
    /// Canonical text form, identical to what the generator emitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedQuery::Sql(sql) => write!(f, "{sql}"),
            GeneratedQuery::Document {
                collection,
                filter: None,
            } => write!(f, "{DOCUMENT_QUERY_PREFIX} {collection}"),
            GeneratedQuery::Document {
                collection,
                filter: Some(filter),
            } => write!(f, "{DOCUMENT_QUERY_PREFIX} {collection} {filter}"),
        }
    }
}
