//! Default values for all configuration fields.

/// Embedding provider selected when none is configured.
pub const DEFAULT_PROVIDER: &str = "remote";

/// Embedding model identifier stored alongside every vector.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Full embedding dimensionality.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// Remote provider endpoint.
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Remote provider request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// L1 in-memory embedding cache capacity (entries).
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

/// The L2 write-behind buffer is flushed to durable storage every N misses.
pub const DEFAULT_FLUSH_EVERY_MISSES: u64 = 10;

/// Read connections in the store pool.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Similar patterns returned per question.
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

/// Cautionary error patterns returned per question.
pub const DEFAULT_CAUTIONARY_LIMIT: usize = 2;

/// Schema hint rows returned per question.
pub const DEFAULT_SCHEMA_HINT_LIMIT: usize = 5;

/// Schema hint cache time-to-live.
pub const DEFAULT_SCHEMA_TTL_SECS: u64 = 3600;

/// Patterns below this success rate are excluded from similarity search.
pub const DEFAULT_MIN_SUCCESS_RATE: f64 = 0.7;

/// Cosine similarity floor below which a pattern is not considered a match.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.7;

/// Success-rate increment applied on each successful reuse, capped at 1.0.
pub const DEFAULT_SUCCESS_BUMP: f64 = 0.01;

/// Multiplicative success-rate decay applied to idle patterns.
pub const DEFAULT_DECAY_FACTOR: f64 = 0.95;

/// Days without use before a pattern starts decaying.
pub const DEFAULT_DECAY_IDLE_DAYS: i64 = 30;

/// Patterns below this success rate with few executions are deleted.
pub const DEFAULT_PRUNE_SUCCESS_FLOOR: f64 = 0.3;

/// Minimum execution count protecting a low-quality pattern from deletion.
pub const DEFAULT_PRUNE_MIN_EXECUTIONS: u64 = 3;

/// Days without use before an infrequently used pattern is deleted.
pub const DEFAULT_STALE_DAYS: i64 = 90;

/// Minimum execution count protecting a stale pattern from deletion.
pub const DEFAULT_STALE_MIN_EXECUTIONS: u64 = 5;

/// Rows re-embedded per maintenance run.
pub const DEFAULT_BACKFILL_BATCH: usize = 64;

/// Recent outcomes retained in the learning window.
pub const DEFAULT_OUTCOME_WINDOW: usize = 100;

/// Success rate below which a reseed is recommended.
pub const DEFAULT_RESEED_SUCCESS_FLOOR: f64 = 0.75;

/// Minimum observed queries before the reseed signal can fire.
pub const DEFAULT_RESEED_MIN_QUERIES: usize = 100;
