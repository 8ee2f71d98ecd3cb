//! Collection path benchmarks
//!
//! Measures catalogue evaluation and full `collect` on a static snapshot.
//!
//! Run with: `cargo bench --bench collect_bench -p poolstat-core`

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poolstat_core::{PoolStatsCollector, PoolStatsPort};
use poolstat_domain::PoolStat;
use prometheus::core::Collector;
use prometheus::{Encoder, Registry, TextEncoder};

struct BenchPool(PoolStat);

impl PoolStatsPort for BenchPool {
    fn stat(&self) -> PoolStat {
        self.0
    }
}

fn bench_pool() -> Arc<BenchPool> {
    Arc::new(BenchPool(PoolStat {
        acquire_count: 1_000_000,
        acquire_duration: Duration::from_millis(123_456),
        acquired_conns: 7,
        canceled_acquire_count: 12,
        constructing_conns: 1,
        empty_acquire_count: 4_500,
        idle_conns: 2,
        max_conns: 10,
        total_conns: 10,
    }))
}

fn bench_samples(c: &mut Criterion) {
    let collector = PoolStatsCollector::new("bench", bench_pool()).unwrap();
    c.bench_function("samples", |b| b.iter(|| black_box(collector.samples())));
}

fn bench_collect(c: &mut Criterion) {
    let collector = PoolStatsCollector::new("bench", bench_pool()).unwrap();
    c.bench_function("collect", |b| b.iter(|| black_box(collector.collect())));
}

fn bench_gather_and_encode(c: &mut Criterion) {
    let registry = Registry::new();
    PoolStatsCollector::new("bench", bench_pool()).unwrap().register(&registry).unwrap();
    let encoder = TextEncoder::new();

    c.bench_function("gather_and_encode", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(2048);
            encoder.encode(&registry.gather(), &mut buffer).unwrap();
            black_box(buffer)
        });
    });
}

criterion_group!(benches, bench_samples, bench_collect, bench_gather_and_encode);
criterion_main!(benches);
