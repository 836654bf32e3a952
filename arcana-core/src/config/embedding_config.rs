use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider kind: "openai" (HTTP) or "hashed" (offline fallback).
    pub provider: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub api_base: String,
    /// Bearer credential; required for the HTTP provider.
    pub api_key: Option<String>,
    pub model: String,
    /// Expected output vector width; responses are validated against it.
    pub dimensions: usize,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            api_base: defaults::DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}
