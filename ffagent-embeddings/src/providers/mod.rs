//! Embedding provider implementations.

mod hashing;
mod remote;

pub use hashing::HashingProvider;
pub use remote::RemoteProvider;

use ffagent_core::config::EmbeddingConfig;
use ffagent_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the provider selected by configuration.
///
/// Provider choice is explicit: a failed remote call at runtime propagates
/// `EmbeddingError::Unavailable` rather than silently switching providers,
/// because vectors from different models are not comparable.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "hashing" => {
            info!(dims = config.dimensions, "using local hashing embeddings");
            Box::new(HashingProvider::new(config.dimensions))
        }
        _ => {
            info!(
                model = %config.model_id,
                endpoint = %config.endpoint,
                "using remote embedding provider"
            );
            Box::new(RemoteProvider::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_provider_is_selected_by_name() {
        let config = EmbeddingConfig {
            provider: "hashing".into(),
            dimensions: 64,
            ..Default::default()
        };
        let provider = create_provider(&config);
        assert_eq!(provider.model_id(), "hashing-v1");
        assert_eq!(provider.dimensions(), 64);
    }

    #[test]
    fn anything_else_selects_the_remote_provider() {
        let config = EmbeddingConfig::default();
        let provider = create_provider(&config);
        assert_eq!(provider.model_id(), config.model_id);
    }
}
