//! Two-tier embedding cache.
//!
//! L1 is a bounded in-memory map for hot questions; L2 is a SQLite table
//! that survives restarts. Keys incorporate the model id so a model
//! upgrade never serves stale vectors.

mod l1_memory;
mod l2_sqlite;

pub use l1_memory::L1MemoryCache;
pub use l2_sqlite::L2SqliteCache;

/// Cache key for a (model, text) pair.
///
/// The separator byte keeps `("ab", "c")` and `("a", "bc")` distinct.
pub fn cache_key(model_id: &str, text: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(model_id.as_bytes());
    hasher.update(&[0x1f]);
    hasher.update(text.as_bytes());
    hasher.finalize().to_hex().to_string()
}
