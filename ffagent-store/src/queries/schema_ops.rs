//! Schema-hint persistence.

use rusqlite::{params, Connection, Row};

use ffagent_core::errors::AgentResult;
use ffagent_core::models::SchemaHint;

use crate::to_storage_err;

fn map_hint_row(row: &Row<'_>) -> Result<SchemaHint, rusqlite::Error> {
    Ok(SchemaHint {
        table_name: row.get(0)?,
        column_name: row.get(1)?,
        description: row.get(2)?,
    })
}

/// Replace the indexed schema with the given hints, in one transaction.
pub fn replace_hints(conn: &mut Connection, hints: &[SchemaHint]) -> AgentResult<()> {
    let tx = conn
        .transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    tx.execute("DELETE FROM schema_hints", [])
        .map_err(|e| to_storage_err(e.to_string()))?;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO schema_hints (table_name, column_name, description)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(table_name, IFNULL(column_name, '')) DO UPDATE SET
                    description = excluded.description",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for hint in hints {
            stmt.execute(params![hint.table_name, hint.column_name, hint.description])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Load every stored schema hint.
pub fn all_hints(conn: &Connection) -> AgentResult<Vec<SchemaHint>> {
    let mut stmt = conn
        .prepare(
            "SELECT table_name, column_name, description
             FROM schema_hints
             ORDER BY table_name, column_name",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], map_hint_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
