use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::query::QueryKind;
use super::spread::SpreadType;

/// What one retrieval query did: issued text, retrieved ids, timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTrace {
    pub text: String,
    pub kind: QueryKind,
    pub card_id: Option<u32>,
    pub position: Option<String>,
    pub chunk_ids: Vec<String>,
    pub similarities: Vec<f32>,
    pub latency_ms: u64,
    /// 1 when the first attempt succeeded, 2 when the retry ran.
    pub attempts: u8,
    /// True when both attempts failed and the query contributed nothing.
    pub degraded: bool,
}

impl QueryTrace {
    /// Best similarity this query achieved, if it retrieved anything.
    pub fn best_similarity(&self) -> Option<f32> {
        self.similarities
            .iter()
            .copied()
            .fold(None, |best: Option<f32>, s| Some(best.map_or(s, |b| b.max(s))))
    }
}

/// The structured artifact recorded once per reading.
///
/// Consumed offline to measure chunk-reuse rate and per-archetype
/// coverage, and to flag queries whose evidence was too weak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingTrace {
    pub reading_id: Uuid,
    pub spread_type: SpreadType,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Chunk count summed over queries, before deduplication.
    pub total_chunks: usize,
    /// Distinct chunk ids after the merge.
    pub unique_chunks: usize,
    pub queries: Vec<QueryTrace>,
}

impl ReadingTrace {
    /// Fraction of retrieved chunks that duplicated another query's.
    pub fn duplicate_rate(&self) -> f32 {
        if self.total_chunks == 0 {
            return 0.0;
        }
        (self.total_chunks - self.unique_chunks) as f32 / self.total_chunks as f32
    }

    /// Retrieved chunk count per archetype.
    pub fn coverage_by_kind(&self) -> BTreeMap<QueryKind, usize> {
        let mut coverage = BTreeMap::new();
        for q in &self.queries {
            *coverage.entry(q.kind).or_default() += q.chunk_ids.len();
        }
        coverage
    }

    /// Queries whose best similarity fell below `threshold`, or that
    /// retrieved nothing at all.
    pub fn weak_queries(&self, threshold: f32) -> Vec<&QueryTrace> {
        self.queries
            .iter()
            .filter(|q| q.best_similarity().map_or(true, |s| s < threshold))
            .collect()
    }

    pub fn degraded_count(&self) -> usize {
        self.queries.iter().filter(|q| q.degraded).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(kind: QueryKind, chunk_ids: &[&str], similarities: &[f32], degraded: bool) -> QueryTrace {
        QueryTrace {
            text: "q".to_string(),
            kind,
            card_id: None,
            position: None,
            chunk_ids: chunk_ids.iter().map(|s| s.to_string()).collect(),
            similarities: similarities.to_vec(),
            latency_ms: 10,
            attempts: 1,
            degraded,
        }
    }

    fn reading(queries: Vec<QueryTrace>, total: usize, unique: usize) -> ReadingTrace {
        ReadingTrace {
            reading_id: Uuid::new_v4(),
            spread_type: SpreadType::ThreeCard,
            started_at: Utc::now(),
            duration_ms: 42,
            total_chunks: total,
            unique_chunks: unique,
            queries,
        }
    }

    #[test]
    fn duplicate_rate_counts_collapsed_chunks() {
        let r = reading(vec![], 10, 7);
        assert!((r.duplicate_rate() - 0.3).abs() < 1e-6);
        assert_eq!(reading(vec![], 0, 0).duplicate_rate(), 0.0);
    }

    #[test]
    fn weak_queries_include_empty_results() {
        let strong = trace(QueryKind::Basic, &["a"], &[0.9], false);
        let weak = trace(QueryKind::Visual, &["b"], &[0.3], false);
        let empty = trace(QueryKind::MethodSteps, &[], &[], true);
        let r = reading(vec![strong, weak, empty], 2, 2);

        let flagged = r.weak_queries(0.5);
        assert_eq!(flagged.len(), 2);
        assert_eq!(r.degraded_count(), 1);
    }

    #[test]
    fn coverage_sums_per_kind() {
        let a = trace(QueryKind::Basic, &["a", "b"], &[0.9, 0.8], false);
        let b = trace(QueryKind::Basic, &["c"], &[0.7], false);
        let c = trace(QueryKind::Visual, &["d"], &[0.6], false);
        let r = reading(vec![a, b, c], 4, 4);

        let coverage = r.coverage_by_kind();
        assert_eq!(coverage[&QueryKind::Basic], 3);
        assert_eq!(coverage[&QueryKind::Visual], 1);
    }
}
