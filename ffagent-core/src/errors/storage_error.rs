/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("connection lock poisoned: {context}")]
    LockPoisoned { context: String },
}
