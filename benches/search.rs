//! Benchmarks for distance search.
//!
//! Run with: cargo bench --bench search
//!
//! Targets sit a fixed number of rolls ahead of the start, so each iteration
//! walks exactly that many transitions before matching.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seedstep::xorshift::apply_transitions;
use seedstep::{
    CancellationToken, Direction, DistanceSearch, ExecutionMode, NoProgress, SearchConfig, Seed,
};
use std::hint::black_box;

fn bench_search_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("DistanceSearch");
    let transitions = 2_000_000u64;
    let start = Seed::normalize(0x1234_5678);
    let target = Seed::normalize(apply_transitions(start.get(), transitions, Direction::Forward));
    group.throughput(Throughput::Elements(transitions));

    for mode in [
        ExecutionMode::Fast,
        ExecutionMode::Normal,
        ExecutionMode::Precise,
    ] {
        let config = SearchConfig::new().with_mode(mode);
        group.bench_with_input(BenchmarkId::new("forward", mode), &config, |b, &config| {
            let token = CancellationToken::new();
            b.iter(|| {
                DistanceSearch::new(black_box(start), target, config)
                    .map(|search| search.run(&token, &NoProgress))
            });
        });
    }

    group.finish();
}

fn bench_search_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("DistanceSearch by distance");
    let start = Seed::normalize(1);
    let token = CancellationToken::new();

    for rolls in [1_000u64, 100_000, 1_000_000] {
        let target = Seed::normalize(apply_transitions(1, rolls * 2, Direction::Forward));
        group.throughput(Throughput::Elements(rolls * 2));
        group.bench_with_input(BenchmarkId::new("normal", rolls), &target, |b, &target| {
            b.iter(|| {
                DistanceSearch::new(start, black_box(target), SearchConfig::new())
                    .map(|search| search.run(&token, &NoProgress))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search_modes, bench_search_distance);
criterion_main!(benches);
