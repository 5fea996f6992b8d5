//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use ffagent_core::errors::AgentResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
///
/// In-memory databases are per-connection, so the in-memory pool carries
/// no readers and routes every read through the writer.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path, read_pool_size: usize) -> AgentResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory connection pool (tests and ephemeral sessions).
    pub fn open_in_memory() -> AgentResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }

    /// Run a read-only query on a pooled reader, or on the writer when no
    /// read pool exists.
    pub fn with_reader<F, T>(&self, f: F) -> AgentResult<T>
    where
        F: FnOnce(&Connection) -> AgentResult<T>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.writer.with_conn_sync(|conn| f(conn)),
        }
    }

    /// Run a statement on the write connection.
    pub fn with_writer<F, T>(&self, f: F) -> AgentResult<T>
    where
        F: FnOnce(&mut Connection) -> AgentResult<T>,
    {
        self.writer.with_conn_sync(f)
    }
}
