/// FF_Agent core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error messages are deduplicated on their first N characters.
pub const ERROR_PREFIX_LEN: usize = 100;

/// Maximum batch size for bulk pattern imports.
pub const MAX_SEED_BATCH_SIZE: usize = 1000;

/// Directive prefix emitted by the query generator for document-store queries.
pub const DOCUMENT_QUERY_PREFIX: &str = "FIREBASE_QUERY:";
