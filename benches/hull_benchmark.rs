#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for convex hulls and Delaunay triangulation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_raster::prelude::*;

/// Deterministic scatter from a linear congruential sequence.
fn scatter(n: usize) -> Vec<Point> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        ((state >> 33) % 1000) as f64
    };
    (0..n).map(|_| Point::new(next(), next())).collect()
}

fn hull_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex_hull");

    for size in [100, 1_000, 10_000] {
        let points = scatter(size);
        for algorithm in HullAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), size),
                &points,
                |b, points| {
                    b.iter(|| convex_hull(black_box(points), algorithm));
                },
            );
        }
    }

    group.finish();
}

fn delaunay_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("delaunay");
    group.sample_size(20);

    for size in [50, 200, 800] {
        let points = scatter(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| delaunay(black_box(points)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, hull_benchmark, delaunay_benchmark);
criterion_main!(benches);
