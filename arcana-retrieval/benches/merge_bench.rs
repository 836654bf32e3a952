use arcana_core::models::{Chunk, Query, QueryKind};
use arcana_retrieval::{merge, QueryOutcome};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn outcomes(queries: usize, chunks_per_query: usize, id_space: usize) -> Vec<QueryOutcome> {
    (0..queries)
        .map(|q| QueryOutcome {
            query: Query {
                text: format!("query {q}"),
                kind: QueryKind::Basic,
                card_id: Some(q as u32),
                position: None,
            },
            chunks: (0..chunks_per_query)
                .map(|c| {
                    let id = (q * 7 + c * 13) % id_space;
                    Chunk {
                        id: format!("chunk-{id}"),
                        source: if id % 2 == 0 { "pkt" } else { "78degrees" }.to_string(),
                        text: format!("text for chunk {id}"),
                        similarity: 0.9 - (c as f32) * 0.05,
                    }
                })
                .collect(),
            latency_ms: 10,
            attempts: 1,
            degraded: false,
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    // Roughly a celtic cross fan-out: ~60 queries, heavy id overlap.
    let input = outcomes(60, 10, 120);
    c.bench_function("merge_celtic_cross_fanout", |b| {
        b.iter(|| merge(black_box(&input)));
    });

    let disjoint = outcomes(60, 10, 100_000);
    c.bench_function("merge_disjoint_ids", |b| {
        b.iter(|| merge(black_box(&disjoint)));
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
