use async_trait::async_trait;

use crate::errors::ArcanaResult;

/// Embedding backend seam.
///
/// Implementations are batchable; `embed` is the single-text convenience
/// over `embed_batch`.
#[async_trait]
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed one text.
    async fn embed(&self, text: &str) -> ArcanaResult<Vec<f32>>;

    /// Embed a batch, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> ArcanaResult<Vec<Vec<f32>>>;

    /// Output vector width.
    fn dimensions(&self) -> usize;

    /// Short provider name for logs and traces.
    fn name(&self) -> &str;

    /// Whether the provider can serve right now.
    fn is_available(&self) -> bool;
}
