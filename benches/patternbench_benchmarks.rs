// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Patternbench Benchmarks
//!
//! Criterion benchmarks for the three matchers. They complement the
//! built-in evaluator with statistical regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use fastrand::Rng;
use patternbench_lib::evaluator::workload::{dna_text, repetitive_pattern, repetitive_text, sample_pattern};
use patternbench_lib::matchers::{
    BitapMatcher, DfaConstruction, DfaMatcher, DfaOptions, Matcher, ZMatcher,
};
use std::time::Duration;

fn matchers() -> Vec<(&'static str, Box<dyn Matcher>)> {
    let failure_function = DfaOptions::new().construction(DfaConstruction::FailureFunction);
    let boxed: [(&'static str, Box<dyn Matcher>); 4] = [
        ("z_algorithm", Box::new(ZMatcher::new())),
        ("bitap", Box::new(BitapMatcher::new())),
        ("dfa_naive", Box::new(DfaMatcher::new(DfaOptions::new()))),
        ("dfa_failure_function", Box::new(DfaMatcher::new(failure_function))),
    ];
    boxed.into()
}

/// Search throughput on random DNA for growing texts
fn bench_search_dna(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_dna");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    let mut rng = Rng::with_seed(42);
    for size in [1_000, 10_000, 100_000] {
        let text = dna_text(&mut rng, size);
        let Ok(pattern) = sample_pattern(&mut rng, &text, 12) else {
            continue;
        };
        group.throughput(Throughput::Elements(size as u64));

        for (name, mut matcher) in matchers() {
            if matcher.preprocess(&pattern).is_err() {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(name, size), &text, |b, text| {
                b.iter(|| matcher.find_all(black_box(text)));
            });
        }
    }

    group.finish();
}

/// Search on the repetitive worst case `A^(m-1)B`
fn bench_search_repetitive(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_repetitive");
    group.sampling_mode(SamplingMode::Flat);

    let size = 50_000;
    group.throughput(Throughput::Elements(size as u64));
    for m in [4, 16, 64] {
        let text = repetitive_text(size, m);
        let pattern = repetitive_pattern(m);

        for (name, mut matcher) in matchers() {
            if matcher.preprocess(&pattern).is_err() {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(name, m), &text, |b, text| {
                b.iter(|| matcher.find_all(black_box(text)));
            });
        }
    }

    group.finish();
}

/// Preprocessing cost by pattern length
fn bench_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    let mut rng = Rng::with_seed(7);
    let text = dna_text(&mut rng, 1_000);
    for m in [8, 32, 64] {
        let Ok(pattern) = sample_pattern(&mut rng, &text, m) else {
            continue;
        };
        for (name, mut matcher) in matchers() {
            group.bench_with_input(BenchmarkId::new(name, m), &pattern, |b, pattern| {
                b.iter(|| matcher.preprocess(black_box(pattern)));
            });
        }
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02);
    targets = bench_search_dna, bench_search_repetitive, bench_preprocess
}

criterion_main!(benches);
