//! Falsification Tests
//!
//! Each test is a falsifiable claim about the rasterization and geometry
//! kernel that can be empirically refuted.
//!
//! Run: cargo test --test falsification_test

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use proptest::prelude::*;

use trueno_raster::hull::{graham_scan, jarvis_march};
use trueno_raster::prelude::*;
use trueno_raster::render::{paint_spans, PixelSeedFill, ScanlineFill, ScanlineSeedFill};
use trueno_raster::transform::{apply, rotation_y};

fn pixels(p1: Pixel, p2: Pixel, algorithm: LineAlgorithm) -> Vec<Pixel> {
    rasterize_line(p1, p2, algorithm).map(|s| s.pixel).collect()
}

fn vertex_set(points: &[Point]) -> BTreeSet<(i64, i64)> {
    points.iter().map(|p| (p.x as i64, p.y as i64)).collect()
}

fn square() -> Polygon {
    Polygon::from_pixels(&[
        Pixel::new(0, 0),
        Pixel::new(10, 0),
        Pixel::new(10, 10),
        Pixel::new(0, 10),
    ])
}

// ============================================================================
// LINES (1-3)
// ============================================================================

/// Claim 1: Bresenham (0,0)→(5,2) follows the integer error rule exactly
#[test]
fn claim_01_bresenham_concrete_sequence() {
    let got = pixels(Pixel::new(0, 0), Pixel::new(5, 2), LineAlgorithm::Bresenham);
    let expected: Vec<Pixel> = [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
        .into_iter()
        .map(Pixel::from)
        .collect();
    assert_eq!(got, expected, "Claim 1 FALSIFIED: {got:?}");
}

/// Claim 2: Bresenham handles all eight octants with one code path
#[test]
fn claim_02_bresenham_all_octants() {
    let origin = Pixel::new(0, 0);
    for (dx, dy) in [(7, 3), (3, 7), (-3, 7), (-7, 3), (-7, -3), (-3, -7), (3, -7), (7, -3)] {
        let end = Pixel::new(dx, dy);
        let line = pixels(origin, end, LineAlgorithm::Bresenham);
        assert_eq!(line.len(), 8, "Claim 2 FALSIFIED: octant ({dx}, {dy})");
        assert_eq!(line.last(), Some(&end), "Claim 2 FALSIFIED: octant ({dx}, {dy})");
    }
}

/// Claim 3: Wu never divides by zero on a single-point line
#[test]
fn claim_03_wu_degenerate_line() {
    let p = Pixel::new(4, 4);
    let samples: Vec<_> = rasterize_line(p, p, LineAlgorithm::Wu).collect();
    assert_eq!(samples.len(), 2, "Claim 3 FALSIFIED");
    assert!(samples.iter().all(|s| s.intensity.is_some_and(f64::is_finite)));
}

// ============================================================================
// FILLS (4-6)
// ============================================================================

/// Claim 4: the square fills rows 0..=9, each spanning x = 0..=9
#[test]
fn claim_04_square_fill_half_open() {
    let spans: Vec<Span> = fill(&square(), FillAlgorithm::OrderedEdgeList, Bounds::new(20, 20))
        .unwrap()
        .collect();
    let expected: Vec<Span> = (0..10).map(|y| Span::new(y, 0, 9)).collect();
    assert_eq!(spans, expected, "Claim 4 FALSIFIED");
}

/// Claim 5: ordered and active edge-list fills are identical
#[test]
fn claim_05_edge_list_variants_identical() {
    let poly = Polygon::from_pixels(&[
        Pixel::new(2, 2),
        Pixel::new(30, 6),
        Pixel::new(14, 14),
        Pixel::new(30, 26),
        Pixel::new(3, 28),
    ]);
    let bounds = Bounds::new(40, 40);
    let ordered: Vec<_> = fill(&poly, FillAlgorithm::OrderedEdgeList, bounds).unwrap().collect();
    let active: Vec<_> = fill(&poly, FillAlgorithm::ActiveEdgeList, bounds).unwrap().collect();
    assert_eq!(ordered, active, "Claim 5 FALSIFIED");
}

/// Claim 6: a seed outside the polygon is rejected, never flooded
#[test]
fn claim_06_seed_outside_rejected() {
    let poly = square();
    let result = fill(&poly, FillAlgorithm::PixelSeed(Pixel::new(15, 15)), Bounds::new(20, 20));
    assert!(
        matches!(result, Err(Error::SeedOutsidePolygon { x: 15, y: 15 })),
        "Claim 6 FALSIFIED"
    );
}

/// Claim 7: painting a fill into a framebuffer marks exactly its pixels
#[test]
fn claim_07_fill_paints_framebuffer() {
    let mut fb = Framebuffer::new(20, 20).unwrap();
    fb.clear(Rgba::WHITE);
    let poly = square();
    let raster = fill(&poly, FillAlgorithm::ActiveEdgeList, fb.bounds()).unwrap();
    paint_spans(&mut fb, raster, Rgba::BLUE);
    assert_eq!(fb.painted_count(Rgba::WHITE), 100, "Claim 7 FALSIFIED");
    assert_eq!(fb.get_pixel(9, 9), Some(Rgba::BLUE));
    assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
}

// ============================================================================
// TRANSFORMS (8)
// ============================================================================

/// Claim 8: rotation_y(π/2) maps (1,0,0,1) to (0,0,-1,1)
#[test]
fn claim_08_rotation_y_quarter_turn() {
    let out = apply(&[Point3::new(1.0, 0.0, 0.0)], &rotation_y(FRAC_PI_2))[0];
    assert_relative_eq!(out.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(out.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(out.z, -1.0, epsilon = 1e-12);
    assert_relative_eq!(out.w, 1.0, epsilon = 1e-12);
}

// ============================================================================
// PROPERTIES (9-15)
// ============================================================================

fn pixel() -> impl Strategy<Value = Pixel> {
    (-60i32..60, -60i32..60).prop_map(|(x, y)| Pixel::new(x, y))
}

fn lattice_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0i32..50, 0i32..50), 3..40).prop_map(|raw| {
        raw.into_iter()
            .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Claim 9: DDA and Bresenham share endpoints and are monotonic along
    /// the dominant axis
    #[test]
    fn claim_09_dda_bresenham_agree(p1 in pixel(), p2 in pixel()) {
        let dda = pixels(p1, p2, LineAlgorithm::Dda);
        let bres = pixels(p1, p2, LineAlgorithm::Bresenham);
        prop_assert_eq!(dda.first(), Some(&p1));
        prop_assert_eq!(bres.first(), Some(&p1));
        prop_assert_eq!(dda.last(), Some(&p2));
        prop_assert_eq!(bres.last(), Some(&p2));

        let x_major = (p2.x - p1.x).abs() >= (p2.y - p1.y).abs();
        for line in [&dda, &bres] {
            for w in line.windows(2) {
                let (a, b) = if x_major {
                    (w[0].x, w[1].x)
                } else {
                    (w[0].y, w[1].y)
                };
                let forward = if x_major { p2.x >= p1.x } else { p2.y >= p1.y };
                let monotone = if forward { b >= a } else { b <= a };
                prop_assert!(monotone);
            }
        }
    }

    /// Claim 10: Wu's paired intensities at each major step sum to 1
    #[test]
    fn claim_10_wu_intensities_sum_to_one(p1 in pixel(), p2 in pixel()) {
        let samples: Vec<_> = rasterize_line(p1, p2, LineAlgorithm::Wu).collect();
        prop_assert_eq!(samples.len() % 2, 0);
        for pair in samples.chunks_exact(2) {
            let sum = pair[0].intensity.unwrap() + pair[1].intensity.unwrap();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    /// Claim 11: Graham scan over a Jarvis hull yields the same vertex set
    #[test]
    fn claim_11_hull_idempotence(points in lattice_points()) {
        let jarvis = jarvis_march(&points);
        let graham = graham_scan(&jarvis);
        prop_assert_eq!(vertex_set(&graham), vertex_set(&jarvis));
    }

    /// Claim 12: every hull is convex
    #[test]
    fn claim_12_hull_is_convex(points in lattice_points()) {
        for algorithm in HullAlgorithm::ALL {
            let hull = convex_hull(&points, algorithm);
            if hull.len() >= 3 {
                prop_assert!(is_convex(&hull));
            }
        }
    }

    /// Claim 13: appending the first vertex never changes containment
    #[test]
    fn claim_13_pip_closing_duplicate(
        points in lattice_points(),
        qx in -5i32..55,
        qy in -5i32..55,
    ) {
        let mut closed = points.clone();
        closed.push(points[0]);
        let q = Point::new(f64::from(qx) + 0.5, f64::from(qy));
        prop_assert_eq!(point_in_polygon(q, &points), point_in_polygon(q, &closed));
    }

    /// Claim 14: scanline seed fill and pixel seed fill paint the same set
    #[test]
    fn claim_14_seed_fills_agree(points in lattice_points(), sx in 0i32..50, sy in 0i32..50) {
        let hull = convex_hull(&points, HullAlgorithm::Graham);
        let seed = Pixel::new(sx, sy);
        let bounds = Bounds::new(60, 60);
        if let Ok(flood) = PixelSeedFill::new(&hull, seed, bounds) {
            let by_pixel: BTreeSet<Pixel> = flood.collect();
            let by_span: BTreeSet<Pixel> = ScanlineSeedFill::new(&hull, seed, bounds)
                .unwrap()
                .flat_map(|s| s.pixels())
                .collect();
            prop_assert_eq!(by_pixel, by_span);
        }
    }

    /// Claim 15: on a convex polygon whose rows overlap, the scanline sweep
    /// and the pixel seed fill paint the same pixel set
    #[test]
    fn claim_15_sweep_matches_pixel_seed(points in lattice_points()) {
        let hull = Polygon::new(convex_hull(&points, HullAlgorithm::Graham));
        let rows: Vec<Span> = ScanlineFill::new(&hull).collect();
        let connected = rows.windows(2).all(|w| {
            w[1].y == w[0].y + 1 && w[0].x_start <= w[1].x_end && w[1].x_start <= w[0].x_end
        });
        if let (true, Some(mid)) = (connected, rows.get(rows.len() / 2)) {
            let seed = Pixel::new((mid.x_start + mid.x_end) / 2, mid.y);
            if let Ok(flood) = PixelSeedFill::new(hull.vertices(), seed, Bounds::new(60, 60)) {
                let by_seed: BTreeSet<Pixel> = flood.collect();
                let by_sweep: BTreeSet<Pixel> = rows.iter().flat_map(Span::pixels).collect();
                prop_assert_eq!(by_seed, by_sweep);
            }
        }
    }
}

// ============================================================================
// CONCAVE FILL (16)
// ============================================================================

/// Claim 16: the sweep and the pixel seed fill agree on a concave polygon
#[test]
fn claim_16_sweep_matches_pixel_seed_concave() {
    let poly = Polygon::from_pixels(&[
        Pixel::new(2, 2),
        Pixel::new(30, 6),
        Pixel::new(14, 14),
        Pixel::new(30, 26),
        Pixel::new(3, 28),
        Pixel::new(9, 15),
    ]);
    let bounds = Bounds::new(40, 40);
    let sweep: BTreeSet<Pixel> = fill(&poly, FillAlgorithm::OrderedEdgeList, bounds)
        .unwrap()
        .flat_map(|s| s.pixels())
        .collect();
    let flood: BTreeSet<Pixel> = fill(&poly, FillAlgorithm::PixelSeed(Pixel::new(8, 8)), bounds)
        .unwrap()
        .flat_map(|s| s.pixels())
        .collect();
    assert_eq!(sweep, flood, "Claim 16 FALSIFIED");
}
