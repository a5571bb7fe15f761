//! Parametric cubic curves over 4-point control windows.
//!
//! Bezier and B-spline windows slide by one control point per segment, so
//! consecutive segments overlap. Hermite windows advance by three: `p0` and
//! `p3` are the segment ends and `p1`, `p2` are tangent handles, so
//! consecutive Hermite segments share only an end point.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::Point;

/// Cubic basis used to evaluate a control window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurveBasis {
    /// Bernstein cubic.
    #[default]
    Bezier,
    /// Cubic Hermite with tangent handles.
    Hermite,
    /// Uniform cubic B-spline.
    BSpline,
}

impl CurveBasis {
    /// All bases, in menu order.
    pub const ALL: [Self; 3] = [Self::Bezier, Self::Hermite, Self::BSpline];

    /// Control points to advance between consecutive segments.
    #[must_use]
    pub const fn stride(self) -> usize {
        match self {
            Self::Bezier | Self::BSpline => 1,
            Self::Hermite => 3,
        }
    }

    /// Evaluate one window at parameter `t`.
    #[must_use]
    pub fn evaluate(self, window: &[Point; 4], t: f64) -> Point {
        let [p0, p1, p2, p3] = *window;
        match self {
            Self::Bezier => bezier_point(p0, p1, p2, p3, t),
            Self::Hermite => hermite_point(p0, p1, p2, p3, t),
            Self::BSpline => bspline_point(p0, p1, p2, p3, t),
        }
    }
}

impl fmt::Display for CurveBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bezier => "bezier",
            Self::Hermite => "hermite",
            Self::BSpline => "bspline",
        })
    }
}

impl FromStr for CurveBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bezier" => Ok(Self::Bezier),
            "hermite" => Ok(Self::Hermite),
            "bspline" | "b-spline" => Ok(Self::BSpline),
            _ => Err(Error::UnknownVariant {
                kind: "curve basis",
                name: s.to_string(),
            }),
        }
    }
}

const BEZIER: [[f64; 4]; 4] = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

const BSPLINE: [[f64; 4]; 4] = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 0.0, 3.0, 0.0],
    [1.0, 4.0, 1.0, 0.0],
];

/// `[t³ t² t 1] · M · P`, scaled by `scale`.
fn matrix_form(m: &[[f64; 4]; 4], scale: f64, p: [Point; 4], t: f64) -> Point {
    let tv = [t * t * t, t * t, t, 1.0];
    let mut out = Point::ORIGIN;
    for (col, point) in p.iter().enumerate() {
        let weight: f64 = (0..4).map(|row| tv[row] * m[row][col]).sum();
        out = out + *point * (weight * scale);
    }
    out
}

/// Cubic Bezier point at `t`.
#[must_use]
pub fn bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    matrix_form(&BEZIER, 1.0, [p0, p1, p2, p3], t)
}

/// Cubic Hermite point at `t`.
///
/// The curve runs from `p0` to `p3`; its start tangent is `p1 - p0` and its
/// end tangent is `p2 - p3`.
#[must_use]
pub fn hermite_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let h1 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h2 = -2.0 * t3 + 3.0 * t2;
    let h3 = t3 - 2.0 * t2 + t;
    let h4 = t3 - t2;
    p0 * h1 + p3 * h2 + (p1 - p0) * h3 + (p2 - p3) * h4
}

/// Uniform cubic B-spline point at `t`.
#[must_use]
pub fn bspline_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    matrix_form(&BSPLINE, 1.0 / 6.0, [p0, p1, p2, p3], t)
}

/// Sample a piecewise curve over `control` at `steps` evenly spaced
/// parameters per segment (both ends included).
///
/// Fewer than four control points produce nothing.
pub fn sample_curve(control: &[Point], basis: CurveBasis, steps: usize) -> CurveSampler<'_> {
    log::debug!(
        "sample_curve {basis}: {} control points, {steps} steps per segment",
        control.len()
    );
    CurveSampler {
        control,
        basis,
        steps,
        window: 0,
        step: 0,
    }
}

/// Lazy polyline over all segments of a control polygon.
#[derive(Debug, Clone)]
pub struct CurveSampler<'a> {
    control: &'a [Point],
    basis: CurveBasis,
    steps: usize,
    window: usize,
    step: usize,
}

impl CurveSampler<'_> {
    /// Number of segments this control polygon produces.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.control.len() < 4 {
            0
        } else {
            (self.control.len() - 4) / self.basis.stride() + 1
        }
    }

    fn parameter(&self) -> f64 {
        if self.steps <= 1 {
            0.0
        } else {
            self.step as f64 / (self.steps - 1) as f64
        }
    }
}

impl Iterator for CurveSampler<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.steps == 0 {
            return None;
        }
        if self.step == self.steps {
            self.step = 0;
            self.window += self.basis.stride();
        }
        let window: &[Point; 4] = self.control.get(self.window..self.window + 4)?.try_into().ok()?;

        let point = self.basis.evaluate(window, self.parameter());
        self.step += 1;
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_bezier_interpolates_ends() {
        let c = pts(&[(0.0, 0.0), (10.0, 40.0), (30.0, 40.0), (40.0, 0.0)]);
        assert_eq!(bezier_point(c[0], c[1], c[2], c[3], 0.0), c[0]);
        assert_eq!(bezier_point(c[0], c[1], c[2], c[3], 1.0), c[3]);
        let mid = bezier_point(c[0], c[1], c[2], c[3], 0.5);
        assert_relative_eq!(mid.x, 20.0);
        assert_relative_eq!(mid.y, 30.0);
    }

    #[test]
    fn test_hermite_ends_and_tangents() {
        let c = pts(&[(0.0, 0.0), (10.0, 0.0), (50.0, 0.0), (40.0, 0.0)]);
        assert_eq!(hermite_point(c[0], c[1], c[2], c[3], 0.0), c[0]);
        assert_eq!(hermite_point(c[0], c[1], c[2], c[3], 1.0), c[3]);
        let near_start = hermite_point(c[0], c[1], c[2], c[3], 1e-6);
        assert!(near_start.x > 0.0);
    }

    #[test]
    fn test_bspline_weights_sum_to_one() {
        let p = Point::new(7.0, -3.0);
        for t in [0.0, 0.25, 0.5, 1.0] {
            let q = bspline_point(p, p, p, p, t);
            assert_relative_eq!(q.x, 7.0, epsilon = 1e-12);
            assert_relative_eq!(q.y, -3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bspline_start_point() {
        let c = pts(&[(0.0, 0.0), (6.0, 0.0), (12.0, 6.0), (18.0, 0.0)]);
        let q = bspline_point(c[0], c[1], c[2], c[3], 0.0);
        // (p0 + 4 p1 + p2) / 6
        assert_relative_eq!(q.x, 6.0);
        assert_relative_eq!(q.y, 1.0);
    }

    #[test]
    fn test_window_policies() {
        let c: Vec<_> = (0..7).map(|i| Point::new(f64::from(i), 0.0)).collect();
        assert_eq!(sample_curve(&c, CurveBasis::Bezier, 10).segment_count(), 4);
        assert_eq!(sample_curve(&c, CurveBasis::BSpline, 10).segment_count(), 4);
        assert_eq!(sample_curve(&c, CurveBasis::Hermite, 10).segment_count(), 2);

        assert_eq!(sample_curve(&c, CurveBasis::Bezier, 10).count(), 40);
        assert_eq!(sample_curve(&c, CurveBasis::Hermite, 10).count(), 20);
    }

    #[test]
    fn test_hermite_segments_do_not_overlap() {
        let c = pts(&[
            (0.0, 0.0), (5.0, 5.0), (15.0, 5.0), (20.0, 0.0),
            (25.0, -5.0), (35.0, -5.0), (40.0, 0.0),
        ]);
        let samples: Vec<_> = sample_curve(&c, CurveBasis::Hermite, 5).collect();
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[4], c[3]);
        assert_eq!(samples[5], c[3]);
        assert_eq!(samples[9], c[6]);
    }

    #[test]
    fn test_too_few_points() {
        let c = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(sample_curve(&c, CurveBasis::Bezier, 100).count(), 0);
        assert_eq!(sample_curve(&c, CurveBasis::Bezier, 100).segment_count(), 0);
    }

    #[test]
    fn test_single_step_samples_start() {
        let c = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)]);
        let s: Vec<_> = sample_curve(&c, CurveBasis::Bezier, 1).collect();
        assert_eq!(s, vec![c[0]]);
    }

    #[test]
    fn test_basis_from_str() {
        for basis in CurveBasis::ALL {
            assert_eq!(basis.to_string().parse::<CurveBasis>().unwrap(), basis);
        }
        assert_eq!("B-Spline".parse::<CurveBasis>().unwrap(), CurveBasis::BSpline);
    }
}
