//! Cross-query deduplication into one evidence set.
//!
//! Strictly id-keyed: two chunks with the same id are the same evidence
//! no matter which queries found them or what similarity they scored.
//! The operation is commutative and idempotent over input ordering.

use arcana_core::models::{EvidenceBuilder, EvidenceSet};
use tracing::debug;

use crate::executor::QueryOutcome;

/// Merges every per-query result into a frozen [`EvidenceSet`].
pub fn merge(outcomes: &[QueryOutcome]) -> EvidenceSet {
    let mut builder = EvidenceBuilder::new();
    let mut observed = 0usize;

    for outcome in outcomes {
        for chunk in &outcome.chunks {
            builder.observe(&outcome.query, chunk);
            observed += 1;
        }
    }

    let set = builder.freeze();
    debug!(
        observed,
        unique = set.len(),
        queries = outcomes.len(),
        "evidence merged"
    );
    set
}
