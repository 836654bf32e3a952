//! OpenAI-compatible HTTP embedding provider.
//!
//! Talks to a `/embeddings` endpoint with bearer auth. The single-text
//! call delegates to the batch call; response order follows input order
//! per the API contract.

use std::time::Duration;

use arcana_core::config::EmbeddingConfig;
use arcana_core::errors::{ArcanaResult, ConfigError, RetrievalError};
use arcana_core::traits::IEmbeddingProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingObject>,
}

#[derive(Deserialize)]
struct EmbeddingObject {
    embedding: Vec<f32>,
}

pub struct OpenAiEmbeddings {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbeddings {
    /// Fails at construction when the credential is missing; retrieval
    /// must never discover a bad config at query time.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                provider: "openai".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::InvalidField {
                field: "embedding.timeout_secs".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    async fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RetrievalError> {
        let body = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::EmbeddingFailed {
                provider: "openai".to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::EmbeddingFailed {
                provider: "openai".to_string(),
                reason: format!("endpoint returned {status}"),
            });
        }

        let parsed: EmbeddingsResponse =
            response
                .json()
                .await
                .map_err(|e| RetrievalError::EmbeddingFailed {
                    provider: "openai".to_string(),
                    reason: format!("malformed response: {e}"),
                })?;

        if parsed.data.len() != texts.len() {
            return Err(RetrievalError::EmbeddingFailed {
                provider: "openai".to_string(),
                reason: format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    parsed.data.len()
                ),
            });
        }

        debug!(count = texts.len(), model = %self.model, "embedded batch");
        Ok(parsed.data.into_iter().map(|o| o.embedding).collect())
    }
}

#[async_trait]
impl IEmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>> {
        let input = [text.to_string()];
        let batch = self.embed_batch(&input).await?;
        batch
            .into_iter()
            .next()
            .ok_or_else(|| {
                RetrievalError::EmbeddingFailed {
                    provider: "openai".to_string(),
                    reason: "empty batch response".to_string(),
                }
                .into()
            })
    }

    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.request(texts).await?)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: "openai".to_string(),
            api_key: key.map(str::to_string),
            ..EmbeddingConfig::default()
        }
    }

    #[test]
    fn missing_key_fails_construction() {
        assert!(matches!(
            OpenAiEmbeddings::new(&config(None)),
            Err(ConfigError::MissingCredential { .. })
        ));
        assert!(matches!(
            OpenAiEmbeddings::new(&config(Some(""))),
            Err(ConfigError::MissingCredential { .. })
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let mut c = config(Some("sk-test"));
        c.api_base = "https://api.example.com/v1/".to_string();
        let provider = OpenAiEmbeddings::new(&c).unwrap();
        assert_eq!(provider.endpoint, "https://api.example.com/v1/embeddings");
        assert!(provider.is_available());
    }
}
