use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use spacesaving::StreamSummary;
use rand::prelude::*;

// Benchmark the sorted queries on a full summary with a large capacity.
fn benchmark_summary_list(c: &mut Criterion) {
    let mut rng = rand::rng();

    let capacity = 5_000;
    let mut summary = StreamSummary::new(capacity).unwrap();

    // More distinct keys than capacity so evictions spread the counts.
    for _ in 0..(capacity * 20) {
        let key: u64 = rng.random_range(0..(capacity as u64 * 2));
        summary.add(key);
    }

    let mut group = c.benchmark_group("StreamSummary_list");
    group.sample_size(40);
    group.bench_function("sorted_frequencies_5000", |b| {
        b.iter(|| {
            black_box(summary.sorted_frequencies());
        });
    });
    group.bench_function("most_frequents_5000", |b| {
        b.iter(|| {
            black_box(summary.most_frequents());
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_summary_list);
criterion_main!(benches);
