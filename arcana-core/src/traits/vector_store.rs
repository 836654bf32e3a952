use async_trait::async_trait;

use crate::errors::ArcanaResult;
use crate::models::Chunk;

/// Similarity-search backend seam.
#[async_trait]
pub trait IVectorStore: Send + Sync {
    /// Ranked chunks above `min_similarity`, best first. `source_filter`
    /// restricts results to one corpus source.
    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        min_similarity: f32,
        source_filter: Option<&str>,
    ) -> ArcanaResult<Vec<Chunk>>;
}
