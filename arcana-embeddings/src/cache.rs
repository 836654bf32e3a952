//! Reading-scoped single-flight cache for embedding vectors.
//!
//! Keys are blake3 hashes of the normalized query text. Each key maps to
//! one `OnceCell`: the first caller runs the computation, concurrent
//! callers for the same key await the same cell, and a failed
//! computation leaves the cell empty so a retry can run it again.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

/// A shared, immutable embedding vector.
pub type SharedEmbedding = Arc<Vec<f32>>;

/// Lowercases and collapses whitespace so trivially different spellings
/// of the same query share a cache entry.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cache key: blake3 of the normalized text.
pub fn cache_key(text: &str) -> String {
    blake3::hash(normalize(text).as_bytes()).to_hex().to_string()
}

/// The guarded map behind the engine. Scoped to one reading.
#[derive(Default)]
pub struct EmbeddingCache {
    cells: DashMap<String, Arc<OnceCell<SharedEmbedding>>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell for a key, created on first sight. The map guard is
    /// released before the caller awaits the cell.
    pub fn cell(&self, key: &str) -> Arc<OnceCell<SharedEmbedding>> {
        self.cells
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Number of keys seen so far (computed or in flight).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_case_and_whitespace() {
        assert_eq!(normalize("The  Magician\t tarot"), "the magician tarot");
        assert_eq!(cache_key("The  Magician"), cache_key("the magician"));
        assert_ne!(cache_key("the magician"), cache_key("the tower"));
    }

    #[tokio::test]
    async fn same_key_shares_one_cell() {
        let cache = EmbeddingCache::new();
        let a = cache.cell("k");
        let b = cache.cell("k");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        a.get_or_init(|| async { Arc::new(vec![1.0]) }).await;
        assert_eq!(b.get().unwrap().as_slice(), &[1.0]);
    }

    #[tokio::test]
    async fn failed_init_leaves_the_cell_empty() {
        let cache = EmbeddingCache::new();
        let cell = cache.cell("k");
        let result: Result<&SharedEmbedding, &str> =
            cell.get_or_try_init(|| async { Err("boom") }).await;
        assert!(result.is_err());
        assert!(cell.get().is_none());

        // A later attempt can still fill it.
        let ok: Result<&SharedEmbedding, &str> = cell
            .get_or_try_init(|| async { Ok(Arc::new(vec![2.0])) })
            .await;
        assert!(ok.is_ok());
    }
}
