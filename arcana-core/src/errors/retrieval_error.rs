use thiserror::Error;

/// Per-query retrieval failures. Recovered with one retry, after which
/// the query degrades to zero chunks; never aborts a reading.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding failed via {provider}: {reason}")]
    EmbeddingFailed { provider: String, reason: String },

    #[error("vector search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimensions { expected: usize, actual: usize },
}
