//! Line rasterization: DDA, Bresenham and Wu.
//!
//! Every algorithm is a lazy, cloneable iterator so callers can consume it
//! all at once or one pixel per tick for step-by-step visualisation.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::Pixel;

/// Line rasterization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineAlgorithm {
    /// Digital differential analyzer (real-valued increments).
    Dda,
    /// Integer error-term rasterization.
    #[default]
    Bresenham,
    /// Antialiased two-pixel coverage.
    Wu,
}

impl LineAlgorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Self; 3] = [Self::Dda, Self::Bresenham, Self::Wu];
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dda => "dda",
            Self::Bresenham => "bresenham",
            Self::Wu => "wu",
        })
    }
}

impl FromStr for LineAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dda" => Ok(Self::Dda),
            "bresenham" => Ok(Self::Bresenham),
            "wu" => Ok(Self::Wu),
            _ => Err(Error::UnknownVariant {
                kind: "line algorithm",
                name: s.to_string(),
            }),
        }
    }
}

/// One rasterized pixel with optional coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSample {
    /// Pixel coordinate.
    pub pixel: Pixel,
    /// Coverage in `0.0..=1.0`; only Wu produces it.
    pub intensity: Option<f64>,
}

impl LineSample {
    const fn solid(pixel: Pixel) -> Self {
        Self {
            pixel,
            intensity: None,
        }
    }
}

/// Rasterize the segment `p1 → p2` with the chosen algorithm.
///
/// DDA and Bresenham emit pixels in traversal order from `p1` to `p2`. Wu
/// walks its major axis in ascending order and emits two samples per step.
pub fn rasterize_line(p1: Pixel, p2: Pixel, algorithm: LineAlgorithm) -> LineRaster {
    log::debug!("rasterize_line {algorithm} ({}, {}) -> ({}, {})", p1.x, p1.y, p2.x, p2.y);
    match algorithm {
        LineAlgorithm::Dda => LineRaster::Dda(Dda::new(p1, p2)),
        LineAlgorithm::Bresenham => LineRaster::Bresenham(Bresenham::new(p1, p2)),
        LineAlgorithm::Wu => LineRaster::Wu(Wu::new(p1, p2)),
    }
}

/// Iterator over the samples of a rasterized line.
#[derive(Debug, Clone)]
pub enum LineRaster {
    /// DDA traversal.
    Dda(Dda),
    /// Bresenham traversal.
    Bresenham(Bresenham),
    /// Wu traversal.
    Wu(Wu),
}

impl Iterator for LineRaster {
    type Item = LineSample;

    fn next(&mut self) -> Option<LineSample> {
        match self {
            Self::Dda(it) => it.next().map(LineSample::solid),
            Self::Bresenham(it) => it.next().map(LineSample::solid),
            Self::Wu(it) => it.next(),
        }
    }
}

// ============================================================================
// DDA
// ============================================================================

/// Digital differential analyzer.
///
/// Takes `max(|dx|, |dy|)` steps, accumulating real increments and rounding
/// at each of the `steps + 1` samples.
#[derive(Debug, Clone)]
pub struct Dda {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: u64,
}

impl Dda {
    /// Create a DDA traversal from `p1` to `p2`.
    #[must_use]
    pub fn new(p1: Pixel, p2: Pixel) -> Self {
        let dx = f64::from(p2.x) - f64::from(p1.x);
        let dy = f64::from(p2.y) - f64::from(p1.y);
        let steps = dx.abs().max(dy.abs());

        // Equal endpoints: a single sample and no division.
        let (x_inc, y_inc) = if steps == 0.0 {
            (0.0, 0.0)
        } else {
            (dx / steps, dy / steps)
        };

        Self {
            x: f64::from(p1.x),
            y: f64::from(p1.y),
            x_inc,
            y_inc,
            remaining: steps as u64 + 1,
        }
    }
}

impl Iterator for Dda {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let pixel = Pixel::new(self.x.round() as i32, self.y.round() as i32);
        self.x += self.x_inc;
        self.y += self.y_inc;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Dda {}

// ============================================================================
// Bresenham
// ============================================================================

/// Integer incremental line rasterization for all eight octants.
#[derive(Debug, Clone)]
pub struct Bresenham {
    x: i32,
    y: i32,
    end: Pixel,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl Bresenham {
    /// Create a Bresenham traversal from `p1` to `p2`.
    #[must_use]
    pub fn new(p1: Pixel, p2: Pixel) -> Self {
        // Spans of the full i32 range need 33 bits; 2 * err needs 34.
        let dx = (i64::from(p2.x) - i64::from(p1.x)).abs();
        let dy = (i64::from(p2.y) - i64::from(p1.y)).abs();
        Self {
            x: p1.x,
            y: p1.y,
            end: p2,
            dx,
            dy,
            sx: if p1.x < p2.x { 1 } else { -1 },
            sy: if p1.y < p2.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.done {
            return None;
        }

        let current = Pixel::new(self.x, self.y);
        log::trace!("bresenham ({}, {}) err={}", self.x, self.y, self.err);

        if current == self.end {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }
}

// ============================================================================
// Wu
// ============================================================================

/// Xiaolin Wu's antialiased line.
///
/// Steps the major axis in unit increments and emits `(x, ⌊y⌋)` with
/// coverage `1 - frac(y)` followed by `(x, ⌊y⌋ + 1)` with coverage
/// `frac(y)`, remapped through the steep swap.
#[derive(Debug, Clone)]
pub struct Wu {
    steep: bool,
    x: i64,
    x_end: i64,
    y: f64,
    gradient: f64,
    pending: Option<LineSample>,
}

impl Wu {
    /// Create a Wu traversal between `p1` and `p2`.
    #[must_use]
    pub fn new(p1: Pixel, p2: Pixel) -> Self {
        let span = |a: i32, b: i32| (i64::from(b) - i64::from(a)).abs();
        let steep = span(p1.y, p2.y) > span(p1.x, p2.x);

        let (a, b) = if steep {
            (Pixel::new(p1.y, p1.x), Pixel::new(p2.y, p2.x))
        } else {
            (p1, p2)
        };
        let (a, b) = if a.x > b.x { (b, a) } else { (a, b) };

        let dx = f64::from(b.x) - f64::from(a.x);
        let dy = f64::from(b.y) - f64::from(a.y);
        let gradient = if dx == 0.0 { 0.0 } else { dy / dx };

        Self {
            steep,
            x: i64::from(a.x),
            x_end: i64::from(b.x),
            y: f64::from(a.y),
            gradient,
            pending: None,
        }
    }

    fn sample(&self, major: i32, minor: i32, intensity: f64) -> LineSample {
        let pixel = if self.steep {
            Pixel::new(minor, major)
        } else {
            Pixel::new(major, minor)
        };
        LineSample {
            pixel,
            intensity: Some(intensity),
        }
    }
}

impl Iterator for Wu {
    type Item = LineSample;

    fn next(&mut self) -> Option<LineSample> {
        if let Some(second) = self.pending.take() {
            return Some(second);
        }
        if self.x > self.x_end {
            return None;
        }

        let base = self.y.floor();
        let frac = self.y - base;
        let minor = base as i32;
        // x never leaves [a.x, b.x] while emitting.
        let major = self.x as i32;

        let first = self.sample(major, minor, 1.0 - frac);
        self.pending = Some(self.sample(major, minor.saturating_add(1), frac));

        self.x += 1;
        self.y += self.gradient;
        Some(first)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// DDA and Bresenham share both endpoints.
        #[test]
        fn prop_dda_bresenham_endpoints_agree(
            x1 in -200i32..200, y1 in -200i32..200,
            x2 in -200i32..200, y2 in -200i32..200,
        ) {
            let p1 = Pixel::new(x1, y1);
            let p2 = Pixel::new(x2, y2);
            let dda: Vec<_> = Dda::new(p1, p2).collect();
            let bres: Vec<_> = Bresenham::new(p1, p2).collect();
            prop_assert_eq!(dda.first(), Some(&p1));
            prop_assert_eq!(bres.first(), Some(&p1));
            prop_assert_eq!(dda.last(), Some(&p2));
            prop_assert_eq!(bres.last(), Some(&p2));
        }

        /// Both walks are monotonic along the dominant axis.
        #[test]
        fn prop_monotonic_along_major_axis(
            x1 in -200i32..200, y1 in -200i32..200,
            x2 in -200i32..200, y2 in -200i32..200,
        ) {
            let p1 = Pixel::new(x1, y1);
            let p2 = Pixel::new(x2, y2);
            let x_major = (x2 - x1).abs() >= (y2 - y1).abs();
            for walk in [Dda::new(p1, p2).collect::<Vec<_>>(), Bresenham::new(p1, p2).collect()] {
                for w in walk.windows(2) {
                    let (a, b) = if x_major { (w[0].x, w[1].x) } else { (w[0].y, w[1].y) };
                    let (from, to) = if x_major { (x1, x2) } else { (y1, y2) };
                    prop_assert!((b - a) * (to - from).signum() >= 0);
                    prop_assert!((b - a).abs() <= 1);
                }
            }
        }

        /// Wu emits complementary coverage at every major-axis step.
        #[test]
        fn prop_wu_intensities_sum_to_one(
            x1 in -100i32..100, y1 in -100i32..100,
            x2 in -100i32..100, y2 in -100i32..100,
        ) {
            let samples: Vec<_> = Wu::new(Pixel::new(x1, y1), Pixel::new(x2, y2)).collect();
            prop_assert_eq!(samples.len() % 2, 0);
            for pair in samples.chunks(2) {
                let sum = pair[0].intensity.unwrap_or(0.0) + pair[1].intensity.unwrap_or(0.0);
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }
}
