//! Traits at the seams between subsystems.

mod embedding;

pub use embedding::IEmbeddingProvider;
