use arcana_core::models::{Chunk, Query, QueryKind};
use arcana_retrieval::{merge, QueryOutcome};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = QueryKind> {
    prop_oneof![
        Just(QueryKind::Basic),
        Just(QueryKind::Visual),
        Just(QueryKind::Upright),
        Just(QueryKind::Reversed),
        Just(QueryKind::PositionMeaning),
        Just(QueryKind::SuitPsychology),
        Just(QueryKind::MethodSteps),
        Just(QueryKind::NumberPattern),
    ]
}

fn arb_chunk() -> impl Strategy<Value = Chunk> {
    // A small id space forces plenty of cross-query overlap.
    (0u8..12, prop_oneof![Just("pkt"), Just("78degrees")], 0.0f32..1.0).prop_map(
        |(id, source, similarity)| Chunk {
            id: format!("chunk-{id}"),
            source: source.to_string(),
            text: format!("text for chunk-{id}"),
            similarity,
        },
    )
}

fn arb_outcome() -> impl Strategy<Value = QueryOutcome> {
    (arb_kind(), proptest::option::of(0u32..78), prop::collection::vec(arb_chunk(), 0..6))
        .prop_map(|(kind, card_id, mut chunks)| {
            // One query never reports the same chunk twice.
            chunks.sort_by(|a, b| a.id.cmp(&b.id));
            chunks.dedup_by(|a, b| a.id == b.id);
            QueryOutcome {
                query: Query {
                    text: format!("{kind:?} {card_id:?} query"),
                    kind,
                    card_id,
                    position: None,
                },
                chunks,
                latency_ms: 1,
                attempts: 1,
                degraded: false,
            }
        })
}

proptest! {
    #[test]
    fn merge_is_commutative(
        outcomes in prop::collection::vec(arb_outcome(), 0..10),
        seed in any::<u64>(),
    ) {
        let mut shuffled = outcomes.clone();
        // Deterministic permutation from the seed.
        let len = shuffled.len();
        if len > 1 {
            let mut state = seed;
            for i in (1..len).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                shuffled.swap(i, (state % (i as u64 + 1)) as usize);
            }
        }
        prop_assert_eq!(merge(&outcomes), merge(&shuffled));
    }

    #[test]
    fn merge_is_idempotent(outcomes in prop::collection::vec(arb_outcome(), 0..8)) {
        let doubled: Vec<_> = outcomes.iter().chain(outcomes.iter()).cloned().collect();
        prop_assert_eq!(merge(&outcomes), merge(&doubled));
    }

    #[test]
    fn every_chunk_id_appears_exactly_once(outcomes in prop::collection::vec(arb_outcome(), 1..10)) {
        let set = merge(&outcomes);
        let mut seen = std::collections::HashSet::new();
        for entry in set.entries() {
            prop_assert!(seen.insert(entry.id.clone()), "duplicate id {}", entry.id);
            prop_assert!(!entry.provenance.is_empty());
        }
        // Every retrieved id made it into the set.
        for outcome in &outcomes {
            for chunk in &outcome.chunks {
                prop_assert!(set.get(&chunk.id).is_some());
            }
        }
    }

    #[test]
    fn provenance_counts_distinct_observing_queries(outcomes in prop::collection::vec(arb_outcome(), 1..10)) {
        let set = merge(&outcomes);
        for entry in set.entries() {
            let observers = outcomes
                .iter()
                .filter(|o| o.chunks.iter().any(|c| c.id == entry.id))
                .count();
            // Each observing query adds one record; exact duplicates collapse.
            prop_assert!(entry.provenance.len() <= observers);
            prop_assert!(!entry.provenance.is_empty());
        }
    }
}
