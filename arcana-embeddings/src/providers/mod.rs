//! Embedding providers behind the `IEmbeddingProvider` seam.

mod hashed;
mod openai;

pub use hashed::HashedEmbeddings;
pub use openai::OpenAiEmbeddings;

use std::sync::Arc;

use arcana_core::config::EmbeddingConfig;
use arcana_core::errors::ConfigError;
use arcana_core::traits::IEmbeddingProvider;
use tracing::info;

/// Builds the provider named in the config.
///
/// A missing credential for the HTTP provider is a fatal
/// [`ConfigError`]; the config validator has already rejected unknown
/// provider names.
pub fn create_provider(
    config: &EmbeddingConfig,
) -> Result<Arc<dyn IEmbeddingProvider>, ConfigError> {
    let provider: Arc<dyn IEmbeddingProvider> = match config.provider.as_str() {
        "openai" => Arc::new(OpenAiEmbeddings::new(config)?),
        _ => Arc::new(HashedEmbeddings::new(config.dimensions)),
    };
    info!(
        provider = provider.name(),
        dims = provider.dimensions(),
        "embedding provider ready"
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_is_the_default_provider() {
        let provider = create_provider(&EmbeddingConfig::default()).unwrap();
        assert_eq!(provider.name(), "hashed");
    }

    #[test]
    fn openai_without_key_is_a_config_error() {
        let config = EmbeddingConfig {
            provider: "openai".to_string(),
            api_key: None,
            ..EmbeddingConfig::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }
}
