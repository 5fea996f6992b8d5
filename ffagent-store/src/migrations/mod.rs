//! Numbered schema migrations tracked via `PRAGMA user_version`.

mod v001_initial;

use rusqlite::Connection;

use ffagent_core::errors::{AgentError, AgentResult, StorageError};
use tracing::info;

use crate::to_storage_err;

/// Ordered list of migrations. Index i applies schema version i + 1.
const MIGRATIONS: &[fn(&Connection) -> AgentResult<()>] = &[v001_initial::migrate];

/// Apply every migration newer than the database's current version.
/// Returns the schema version after migration.
pub fn run_migrations(conn: &mut Connection) -> AgentResult<i64> {
    let current: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (idx, migrate) in MIGRATIONS.iter().enumerate() {
        let version = (idx + 1) as i64;
        if version <= current {
            continue;
        }
        let tx = conn
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&tx).map_err(|e| {
            AgentError::from(StorageError::MigrationFailed {
                version: version as u32,
                reason: e.to_string(),
            })
        })?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        info!(version, "applied schema migration");
    }

    Ok(MIGRATIONS.len() as i64)
}
