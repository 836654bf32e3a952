//! EmbeddingEngine: memoized embedding lookup for one reading.
//!
//! Wraps a provider behind the single-flight cache and validates the
//! vector width the provider promised. Construct one engine per reading
//! and drop it with the reading; the cache goes with it.

use std::sync::Arc;

use arcana_core::errors::{ArcanaError, ArcanaResult, RetrievalError};
use arcana_core::traits::IEmbeddingProvider;
use tracing::debug;

use crate::cache::{cache_key, EmbeddingCache, SharedEmbedding};

pub struct EmbeddingEngine {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: EmbeddingCache,
}

impl EmbeddingEngine {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            provider,
            cache: EmbeddingCache::new(),
        }
    }

    /// Embeds `text`, computing at most once per normalized text for the
    /// lifetime of this engine. Concurrent callers with the same text
    /// await the first caller's result instead of firing a second
    /// request; a failure leaves no poisoned entry behind.
    pub async fn embed(&self, text: &str) -> ArcanaResult<SharedEmbedding> {
        let key = cache_key(text);
        let cell = self.cache.cell(&key);

        let embedding = cell
            .get_or_try_init(|| async {
                debug!(provider = self.provider.name(), "embedding cache miss");
                let vector = self.provider.embed(text).await?;
                let expected = self.provider.dimensions();
                if vector.len() != expected {
                    return Err(ArcanaError::from(RetrievalError::InvalidDimensions {
                        expected,
                        actual: vector.len(),
                    }));
                }
                Ok(Arc::new(vector))
            })
            .await?;

        Ok(Arc::clone(embedding))
    }

    /// Distinct texts embedded or in flight so far.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
