//! Raw SQL operations. Each function takes a connection and leaves
//! pooling, locking and embedding to the store layer above.

pub mod error_ops;
pub mod maintenance;
pub mod pattern_ops;
pub mod schema_ops;
pub mod similarity;

use chrono::{DateTime, Utc};

/// Parse a stored timestamp, surfacing malformed values as a column
/// conversion error instead of a panic.
pub(crate) fn parse_ts(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
