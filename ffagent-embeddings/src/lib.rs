//! # ffagent-embeddings
//!
//! Embedding generation for the FF_Agent core: provider implementations
//! (remote HTTP, local hashing) behind `IEmbeddingProvider`, and the
//! `CachedEmbedder` engine that memoizes provider calls in a two-tier
//! cache (L1 in-memory, L2 SQLite) keyed by model id + exact text.

pub mod cache;
pub mod engine;
pub mod providers;

pub use engine::CachedEmbedder;
pub use providers::create_provider;
