#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for polygon fill algorithms.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_raster::prelude::*;

/// Regular n-gon inscribed in a circle of radius `r` about `(r, r)`.
fn ngon(n: usize, r: f64) -> Polygon {
    Polygon::new(
        (0..n)
            .map(|i| {
                let t = std::f64::consts::TAU * i as f64 / n as f64;
                Point::new(r + r * t.cos(), r + r * t.sin())
            })
            .collect(),
    )
}

fn fill_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    for radius in [16.0, 64.0, 256.0] {
        let polygon = ngon(24, radius);
        let size = (2.0 * radius) as u32 + 2;
        let bounds = Bounds::new(size, size);
        let seed = Pixel::new(radius as i32, radius as i32);

        let algorithms = [
            ("ordered", FillAlgorithm::OrderedEdgeList),
            ("pixel-seed", FillAlgorithm::PixelSeed(seed)),
            ("scanline-seed", FillAlgorithm::ScanlineSeed(seed)),
        ];
        for (name, algorithm) in algorithms {
            group.bench_with_input(
                BenchmarkId::new(name, radius as u32),
                &algorithm,
                |b, &algorithm| {
                    b.iter(|| {
                        fill(black_box(&polygon), algorithm, bounds)
                            .expect("seed is interior")
                            .count()
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, fill_benchmark);
criterion_main!(benches);
