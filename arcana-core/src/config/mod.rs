//! Explicit configuration passed into each stage at construction.
//!
//! Load once, validate, then share by value or reference. No globals, no
//! module-level singletons.

pub mod defaults;
mod draw_config;
mod embedding_config;
mod retrieval_config;

pub use draw_config::DrawConfig;
pub use embedding_config::EmbeddingConfig;
pub use retrieval_config::RetrievalConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Root configuration for the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcanaConfig {
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub draw: DrawConfig,
}

impl ArcanaConfig {
    /// Loads and validates a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Parses and validates a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(raw).map_err(|e| ConfigError::Parse { reason: e.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.draw.reversal_probability) {
            return Err(ConfigError::InvalidField {
                field: "draw.reversal_probability".to_string(),
                reason: "must lie in [0, 1]".to_string(),
            });
        }
        if self.retrieval.max_concurrent_queries == 0 {
            return Err(ConfigError::InvalidField {
                field: "retrieval.max_concurrent_queries".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::InvalidField {
                field: "embedding.dimensions".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        match self.embedding.provider.as_str() {
            "openai" | "hashed" => {}
            other => {
                return Err(ConfigError::InvalidField {
                    field: "embedding.provider".to_string(),
                    reason: format!("unknown provider {other:?}"),
                })
            }
        }
        Ok(())
    }
}
