//! The single write connection.
//!
//! SQLite allows one writer at a time; serializing all writes through a
//! mutex avoids SQLITE_BUSY churn under concurrent learning updates.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use ffagent_core::errors::{AgentError, AgentResult, StorageError};

use super::pragmas::{tune, Role};
use crate::to_storage_err;

/// Mutex-guarded write connection.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> AgentResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        tune(&conn, Role::Writer)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> AgentResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        tune(&conn, Role::Writer)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> AgentResult<T>
    where
        F: FnOnce(&mut Connection) -> AgentResult<T>,
    {
        let mut guard = self.conn.lock().map_err(|_| {
            AgentError::from(StorageError::LockPoisoned {
                context: "write connection".to_string(),
            })
        })?;
        f(&mut guard)
    }
}
