use serde::{Deserialize, Serialize};

use crate::constants;

/// Fan-out and search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Concurrency cap across query tasks.
    pub max_concurrent_queries: usize,
    /// Delay before the single retry of a failed query.
    pub retry_backoff_ms: u64,
    /// Spread results across corpus sources instead of raw ranking.
    pub balance_sources: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_concurrent_queries: constants::DEFAULT_MAX_CONCURRENT_QUERIES,
            retry_backoff_ms: constants::DEFAULT_RETRY_BACKOFF_MS,
            balance_sources: true,
        }
    }
}
