//! Source-balanced vector search.
//!
//! Fetches a candidate pool above the similarity floor, deduplicates by
//! chunk id keeping the highest-similarity sighting, then either ranks
//! globally or allocates a per-source quota with backfill so one rich
//! corpus cannot crowd out the others.

use std::collections::BTreeMap;
use std::sync::Arc;

use arcana_core::constants::{CANDIDATE_MULTIPLIER, MAX_SEARCH_CANDIDATES};
use arcana_core::errors::ArcanaResult;
use arcana_core::models::Chunk;
use arcana_core::traits::IVectorStore;
use tracing::debug;

pub struct BalancedSearcher {
    store: Arc<dyn IVectorStore>,
}

impl BalancedSearcher {
    pub fn new(store: Arc<dyn IVectorStore>) -> Self {
        Self { store }
    }

    /// Top-K chunks above `min_similarity`, balanced across sources when
    /// asked. Results are always in descending similarity order.
    pub async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
        min_similarity: f32,
        balance_sources: bool,
    ) -> ArcanaResult<Vec<Chunk>> {
        let pool = (top_k * CANDIDATE_MULTIPLIER).min(MAX_SEARCH_CANDIDATES).max(top_k);
        let raw = self
            .store
            .similarity_search(embedding, pool, min_similarity, None)
            .await?;

        let candidates = dedup_by_id(raw);
        let result = if balance_sources {
            balance(candidates, top_k)
        } else {
            take_top(candidates, top_k)
        };

        debug!(
            candidates = pool,
            returned = result.len(),
            balanced = balance_sources,
            "vector search complete"
        );
        Ok(result)
    }
}

/// Collapses duplicate chunk ids, keeping the highest similarity.
fn dedup_by_id(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut best: BTreeMap<String, Chunk> = BTreeMap::new();
    for chunk in chunks {
        match best.get(&chunk.id) {
            Some(seen) if seen.similarity >= chunk.similarity => {}
            _ => {
                best.insert(chunk.id.clone(), chunk);
            }
        }
    }
    best.into_values().collect()
}

fn sort_descending(chunks: &mut [Chunk]) {
    chunks.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn take_top(mut chunks: Vec<Chunk>, top_k: usize) -> Vec<Chunk> {
    sort_descending(&mut chunks);
    chunks.truncate(top_k);
    chunks
}

/// Per-source quota of `ceil(top_k / sources)` plus one unit of slack,
/// then backfill from the globally-best leftovers when a source runs
/// short of eligible candidates.
fn balance(candidates: Vec<Chunk>, top_k: usize) -> Vec<Chunk> {
    let mut by_source: BTreeMap<String, Vec<Chunk>> = BTreeMap::new();
    for chunk in candidates {
        by_source.entry(chunk.source.clone()).or_default().push(chunk);
    }
    let num_sources = by_source.len();
    if num_sources <= 1 {
        return take_top(by_source.into_values().flatten().collect(), top_k);
    }

    let quota = top_k.div_ceil(num_sources) + 1;
    let mut selected = Vec::with_capacity(top_k);
    let mut leftovers = Vec::new();

    for (_, mut chunks) in by_source {
        sort_descending(&mut chunks);
        let cut = quota.min(chunks.len());
        leftovers.extend(chunks.split_off(cut));
        selected.extend(chunks);
    }

    if selected.len() < top_k {
        sort_descending(&mut leftovers);
        let missing = top_k - selected.len();
        selected.extend(leftovers.into_iter().take(missing));
    }

    take_top(selected, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, source: &str, similarity: f32) -> Chunk {
        Chunk {
            id: id.to_string(),
            source: source.to_string(),
            text: format!("text {id}"),
            similarity,
        }
    }

    #[test]
    fn dedup_keeps_the_best_sighting() {
        let deduped = dedup_by_id(vec![
            chunk("a", "pkt", 0.6),
            chunk("a", "pkt", 0.9),
            chunk("b", "pkt", 0.7),
        ]);
        assert_eq!(deduped.len(), 2);
        let a = deduped.iter().find(|c| c.id == "a").unwrap();
        assert_eq!(a.similarity, 0.9);
    }

    #[test]
    fn unbalanced_is_pure_similarity_ranking() {
        let result = take_top(
            vec![
                chunk("a", "pkt", 0.5),
                chunk("b", "78degrees", 0.9),
                chunk("c", "pkt", 0.7),
            ],
            2,
        );
        assert_eq!(result[0].id, "b");
        assert_eq!(result[1].id, "c");
    }

    #[test]
    fn both_sources_get_their_quota() {
        // One source dominates raw similarity; balancing still seats the other.
        let mut candidates: Vec<Chunk> =
            (0..8).map(|i| chunk(&format!("p{i}"), "pkt", 0.9 - i as f32 * 0.01)).collect();
        candidates.extend((0..8).map(|i| chunk(&format!("d{i}"), "78degrees", 0.6 - i as f32 * 0.01)));

        let result = balance(candidates, 6);
        assert_eq!(result.len(), 6);
        let pkt = result.iter().filter(|c| c.source == "pkt").count();
        let degrees = result.iter().filter(|c| c.source == "78degrees").count();
        // quota = ceil(6/2) + 1 = 4 per source, floor(6/2) - 1 guaranteed.
        assert!(pkt >= 2, "pkt got {pkt}");
        assert!(degrees >= 2, "78degrees got {degrees}");
    }

    #[test]
    fn backfill_tops_up_from_the_richer_source() {
        let mut candidates: Vec<Chunk> =
            (0..10).map(|i| chunk(&format!("p{i}"), "pkt", 0.9 - i as f32 * 0.01)).collect();
        candidates.push(chunk("d0", "78degrees", 0.5));

        let result = balance(candidates, 6);
        assert_eq!(result.len(), 6);
        assert!(result.iter().any(|c| c.id == "d0"));
        assert_eq!(result.iter().filter(|c| c.source == "pkt").count(), 5);
    }

    #[test]
    fn balanced_output_is_similarity_ordered() {
        let candidates = vec![
            chunk("a", "pkt", 0.9),
            chunk("b", "78degrees", 0.95),
            chunk("c", "pkt", 0.4),
            chunk("d", "78degrees", 0.3),
        ];
        let result = balance(candidates, 4);
        for pair in result.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn single_source_degenerates_to_plain_ranking() {
        let candidates: Vec<Chunk> =
            (0..5).map(|i| chunk(&format!("p{i}"), "pkt", 0.9 - i as f32 * 0.1)).collect();
        let result = balance(candidates, 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].id, "p0");
    }

    #[test]
    fn fewer_candidates_than_top_k_returns_them_all() {
        let result = balance(vec![chunk("a", "pkt", 0.8)], 10);
        assert_eq!(result.len(), 1);
    }
}
