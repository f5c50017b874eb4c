use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jbm_merge::{JoinStrategy, MergeConfig, Merger};
use jbm_types::{Document, Object};

fn wide_object(keys: usize, offset: usize) -> Document {
    Document::from(
        (0..keys)
            .map(|i| (format!("key{:06}", i * 2 + offset), Document::from(i as i64)))
            .collect::<Object>(),
    )
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_join");
    for size in [16usize, 256, 4096] {
        let a = wide_object(size, 0);
        let b = wide_object(size, 1);
        for strategy in [JoinStrategy::SortedJoin, JoinStrategy::Lookup] {
            let merger = Merger::new(MergeConfig::default().with_strategy(strategy));
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), size),
                &(&a, &b),
                |bench, (a, b)| bench.iter(|| merger.merge_documents(black_box(a), black_box(b))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_join);
criterion_main!(benches);
