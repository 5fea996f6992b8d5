use crate::errors::AgentResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> AgentResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Model identifier stored alongside every vector this provider emits.
    fn model_id(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
