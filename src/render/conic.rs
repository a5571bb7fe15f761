//! Conic rasterization: midpoint circle, two-region ellipse and hyperbola,
//! sampled parabola.
//!
//! Circle points are reflected 8 ways and ellipse/hyperbola points 4 ways
//! using explicit offsets about the center, never trigonometry.

use crate::geometry::Pixel;

/// A conic section and its size parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConicShape {
    /// Circle of radius `r`.
    Circle {
        /// Radius in pixels.
        r: u32,
    },
    /// Axis-aligned ellipse with semi-axes `a` (x) and `b` (y).
    Ellipse {
        /// Horizontal semi-axis.
        a: u32,
        /// Vertical semi-axis.
        b: u32,
    },
    /// East/west hyperbola `x²/a² - y²/b² = 1`, clipped at `|x| ≤ x_limit`.
    Hyperbola {
        /// Distance from center to vertex.
        a: u32,
        /// Conjugate semi-axis.
        b: u32,
        /// Rasterization limit along x, measured from the center.
        x_limit: u32,
    },
    /// Vertical-axis parabola `y = x²/(4p)`, drawn upward on screen.
    Parabola {
        /// Focal parameter; zero produces no pixels.
        p: f64,
        /// Rasterization limit along x, measured from the vertex.
        x_limit: u32,
    },
}

/// Rasterize any conic about `center`.
pub fn rasterize_conic(center: Pixel, shape: ConicShape) -> ConicRaster {
    log::debug!("rasterize_conic {shape:?} at ({}, {})", center.x, center.y);
    match shape {
        ConicShape::Circle { r } => ConicRaster::Circle(rasterize_circle(center, r)),
        ConicShape::Ellipse { a, b } => ConicRaster::Ellipse(rasterize_ellipse(center, a, b)),
        ConicShape::Hyperbola { a, b, x_limit } => {
            ConicRaster::Hyperbola(rasterize_hyperbola(center, a, b, x_limit))
        }
        ConicShape::Parabola { p, x_limit } => {
            ConicRaster::Parabola(rasterize_parabola(center, p, x_limit))
        }
    }
}

/// Midpoint circle about `center`.
pub fn rasterize_circle(center: Pixel, r: u32) -> CircleRaster {
    CircleRaster::new(center, r)
}

/// Two-region midpoint ellipse about `center`.
pub fn rasterize_ellipse(center: Pixel, a: u32, b: u32) -> EllipseRaster {
    EllipseRaster::new(center, a, b)
}

/// Two-region incremental hyperbola about `center`.
pub fn rasterize_hyperbola(center: Pixel, a: u32, b: u32, x_limit: u32) -> HyperbolaRaster {
    HyperbolaRaster::new(center, a, b, x_limit)
}

/// Sampled parabola with its vertex at `vertex`.
pub fn rasterize_parabola(vertex: Pixel, p: f64, x_limit: u32) -> ParabolaRaster {
    ParabolaRaster::new(vertex, p, x_limit)
}

/// Iterator over the pixels of any conic.
#[derive(Debug, Clone)]
pub enum ConicRaster {
    /// Circle traversal.
    Circle(CircleRaster),
    /// Ellipse traversal.
    Ellipse(EllipseRaster),
    /// Hyperbola traversal.
    Hyperbola(HyperbolaRaster),
    /// Parabola traversal.
    Parabola(ParabolaRaster),
}

impl Iterator for ConicRaster {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        match self {
            Self::Circle(it) => it.next(),
            Self::Ellipse(it) => it.next(),
            Self::Hyperbola(it) => it.next(),
            Self::Parabola(it) => it.next(),
        }
    }
}

/// Up to eight reflected points waiting to be yielded.
#[derive(Debug, Clone, Copy, Default)]
struct Reflections {
    points: [Pixel; 8],
    len: usize,
    next: usize,
}

impl Reflections {
    fn fill(&mut self, center: Pixel, offsets: &[(i32, i32)]) {
        for (slot, &(dx, dy)) in self.points.iter_mut().zip(offsets) {
            *slot = center.offset(dx, dy);
        }
        self.len = offsets.len().min(8);
        self.next = 0;
    }

    fn pop(&mut self) -> Option<Pixel> {
        if self.next < self.len {
            let p = self.points[self.next];
            self.next += 1;
            Some(p)
        } else {
            None
        }
    }
}

fn quadrants(x: i32, y: i32) -> [(i32, i32); 4] {
    [(x, y), (-x, y), (x, -y), (-x, -y)]
}

// ============================================================================
// Circle
// ============================================================================

/// Integer midpoint circle with decision variable `d = 3 - 2r`.
#[derive(Debug, Clone)]
pub struct CircleRaster {
    center: Pixel,
    x: i32,
    y: i32,
    d: i64,
    pending: Reflections,
}

impl CircleRaster {
    fn new(center: Pixel, r: u32) -> Self {
        let r = r as i32;
        Self {
            center,
            x: 0,
            y: r,
            d: 3 - 2 * i64::from(r),
            pending: Reflections::default(),
        }
    }
}

impl Iterator for CircleRaster {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if let Some(p) = self.pending.pop() {
            return Some(p);
        }
        if self.x > self.y {
            return None;
        }

        let (x, y) = (self.x, self.y);
        self.pending.fill(
            self.center,
            &[(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)],
        );

        if self.d > 0 {
            self.d += 4 * i64::from(x - y) + 10;
            self.y -= 1;
        } else {
            self.d += 4 * i64::from(x) + 6;
        }
        self.x += 1;

        self.pending.pop()
    }
}

// ============================================================================
// Ellipse
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    First,
    Second,
    Done,
}

/// Two-region midpoint ellipse.
///
/// Region 1 runs while `a²(y - ½) > b²(x + 1)`, region 2 while `y ≥ 0`. The
/// point where the regions meet may be emitted twice.
#[derive(Debug, Clone)]
pub struct EllipseRaster {
    center: Pixel,
    a2: f64,
    b2: f64,
    x: i32,
    y: i32,
    d: f64,
    region: Region,
    pending: Reflections,
}

impl EllipseRaster {
    fn new(center: Pixel, a: u32, b: u32) -> Self {
        let (af, bf) = (f64::from(a), f64::from(b));
        let (a2, b2) = (af * af, bf * bf);
        Self {
            center,
            a2,
            b2,
            x: 0,
            y: b as i32,
            d: b2 - a2 * bf + 0.25 * a2,
            region: Region::First,
            pending: Reflections::default(),
        }
    }

    fn enter_second_region(&mut self) {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        self.d = self.b2 * (x + 0.5).powi(2) + self.a2 * (y - 1.0).powi(2) - self.a2 * self.b2;
        self.region = Region::Second;
    }
}

impl Iterator for EllipseRaster {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if let Some(p) = self.pending.pop() {
            return Some(p);
        }

        let (a2, b2) = (self.a2, self.b2);
        if self.region == Region::First
            && a2 * (f64::from(self.y) - 0.5) <= b2 * (f64::from(self.x) + 1.0)
        {
            self.enter_second_region();
        }
        if self.region == Region::Second && self.y < 0 {
            self.region = Region::Done;
        }

        match self.region {
            Region::First => {
                self.pending.fill(self.center, &quadrants(self.x, self.y));
                self.x += 1;
                let x = f64::from(self.x);
                if self.d < 0.0 {
                    self.d += 2.0 * b2 * x + b2;
                } else {
                    self.y -= 1;
                    self.d += 2.0 * b2 * x - 2.0 * a2 * f64::from(self.y) + b2;
                }
            }
            Region::Second => {
                self.pending.fill(self.center, &quadrants(self.x, self.y));
                self.y -= 1;
                let y = f64::from(self.y);
                if self.d > 0.0 {
                    self.d += a2 - 2.0 * a2 * y;
                } else {
                    self.x += 1;
                    self.d += 2.0 * b2 * f64::from(self.x) - 2.0 * a2 * y + a2;
                }
            }
            Region::Done => return None,
        }

        self.pending.pop()
    }
}

// ============================================================================
// Hyperbola
// ============================================================================

/// Two-region incremental hyperbola, right/left branches.
///
/// Starts at the vertex `(a, 0)`. Region 1 steps `y` while
/// `b²(x - ½) > a²(y + 1)`; region 2 steps `x`. Both stop once `x`
/// passes `x_limit`, since the branch is unbounded.
#[derive(Debug, Clone)]
pub struct HyperbolaRaster {
    center: Pixel,
    a2: f64,
    b2: f64,
    x: i32,
    y: i32,
    x_limit: i32,
    d: f64,
    region: Region,
    pending: Reflections,
}

impl HyperbolaRaster {
    fn new(center: Pixel, a: u32, b: u32, x_limit: u32) -> Self {
        let (af, bf) = (f64::from(a), f64::from(b));
        let (a2, b2) = (af * af, bf * bf);
        let x = a as i32;
        Self {
            center,
            a2,
            b2,
            x,
            y: 0,
            x_limit: x_limit as i32,
            d: b2 * (af + 0.5).powi(2) - a2 - a2 * b2,
            region: Region::First,
            pending: Reflections::default(),
        }
    }

    fn enter_second_region(&mut self) {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        self.d = self.b2 * (x + 1.0).powi(2) - self.a2 * (y + 0.5).powi(2) - self.a2 * self.b2;
        self.region = Region::Second;
    }
}

impl Iterator for HyperbolaRaster {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if let Some(p) = self.pending.pop() {
            return Some(p);
        }

        let (a2, b2) = (self.a2, self.b2);
        if self.x > self.x_limit {
            self.region = Region::Done;
        }
        if self.region == Region::First
            && b2 * (f64::from(self.x) - 0.5) <= a2 * (f64::from(self.y) + 1.0)
        {
            self.enter_second_region();
        }

        match self.region {
            Region::First => {
                // Midpoint (x + ½, y + 1) left of the curve: step outward.
                self.pending.fill(self.center, &quadrants(self.x, self.y));
                self.y += 1;
                if self.d < 0.0 {
                    self.x += 1;
                    self.d += 2.0 * b2 * f64::from(self.x);
                }
                self.d -= a2 * (2.0 * f64::from(self.y) + 1.0);
            }
            Region::Second => {
                // Midpoint (x + 1, y + ½) right of the curve: step upward.
                self.pending.fill(self.center, &quadrants(self.x, self.y));
                self.x += 1;
                if self.d > 0.0 {
                    self.y += 1;
                    self.d -= 2.0 * a2 * f64::from(self.y);
                }
                self.d += b2 * (2.0 * f64::from(self.x) + 1.0);
            }
            Region::Done => return None,
        }

        self.pending.pop()
    }
}

// ============================================================================
// Parabola
// ============================================================================

/// Closed-form parabola sampling, two mirrored pixels per integer `x`.
#[derive(Debug, Clone)]
pub struct ParabolaRaster {
    vertex: Pixel,
    p: f64,
    x: i32,
    x_limit: i32,
    mirrored: Option<Pixel>,
}

impl ParabolaRaster {
    fn new(vertex: Pixel, p: f64, x_limit: u32) -> Self {
        // A zero focal parameter has no finite curve.
        let x_limit = if p == 0.0 || !p.is_finite() { -1 } else { x_limit as i32 };
        Self {
            vertex,
            p,
            x: 0,
            x_limit,
            mirrored: None,
        }
    }
}

impl Iterator for ParabolaRaster {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if let Some(p) = self.mirrored.take() {
            return Some(p);
        }
        if self.x > self.x_limit {
            return None;
        }

        let xf = f64::from(self.x);
        let y = (xf * xf / (4.0 * self.p)).round() as i32;
        let right = self.vertex.offset(self.x, -y);
        self.mirrored = Some(self.vertex.offset(-self.x, -y));
        self.x += 1;
        Some(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Pixel = Pixel::new(100, 100);

    fn radial_error(p: Pixel, r: f64) -> f64 {
        let dx = f64::from(p.x - C.x);
        let dy = f64::from(p.y - C.y);
        ((dx * dx + dy * dy).sqrt() - r).abs()
    }

    #[test]
    fn test_circle_points_on_radius() {
        let pts: Vec<_> = rasterize_circle(C, 20).collect();
        assert_eq!(pts.len() % 8, 0);
        for p in &pts {
            assert!(radial_error(*p, 20.0) < 1.0, "{p:?} strays from radius");
        }
    }

    #[test]
    fn test_circle_first_octant_offsets() {
        let pts: Vec<_> = rasterize_circle(C, 5).take(8).collect();
        assert_eq!(pts[0], Pixel::new(100, 105));
        assert_eq!(pts[1], Pixel::new(105, 100));
        assert_eq!(pts[2], Pixel::new(95, 100));
        assert_eq!(pts[7], Pixel::new(100, 95));
    }

    #[test]
    fn test_circle_decision_uses_pre_step_coordinates() {
        let octant: std::collections::BTreeSet<(i32, i32)> = rasterize_circle(C, 10)
            .map(|p| (p.x - C.x, p.y - C.y))
            .filter(|&(x, y)| 0 <= x && x <= y)
            .collect();
        let expected = [(0, 10), (1, 10), (2, 10), (3, 10), (4, 9), (5, 9), (6, 8), (7, 7)];
        assert_eq!(octant.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_circle_eight_fold_symmetry() {
        let pts: std::collections::HashSet<_> = rasterize_circle(C, 13).collect();
        for p in &pts {
            let (dx, dy) = (p.x - C.x, p.y - C.y);
            assert!(pts.contains(&C.offset(dy, dx)));
            assert!(pts.contains(&C.offset(-dx, dy)));
            assert!(pts.contains(&C.offset(dx, -dy)));
        }
    }

    #[test]
    fn test_ellipse_points_near_curve() {
        let (a, b) = (30.0, 12.0);
        let pts: Vec<_> = rasterize_ellipse(C, 30, 12).collect();
        assert!(!pts.is_empty());
        for p in &pts {
            let x = f64::from(p.x - C.x);
            let y = f64::from(p.y - C.y);
            let v = (x * x) / (a * a) + (y * y) / (b * b);
            assert!((v - 1.0).abs() < 0.2, "{p:?} gives {v}");
        }
        // Extremes reached.
        assert!(pts.iter().any(|p| p.y == 100 && (p.x - 130).abs() <= 1));
        assert!(pts.contains(&Pixel::new(100, 112)));
    }

    #[test]
    fn test_ellipse_equal_axes_is_circle_like() {
        let pts: Vec<_> = rasterize_ellipse(C, 10, 10).collect();
        for p in &pts {
            assert!(radial_error(*p, 10.0) < 1.0);
        }
    }

    #[test]
    fn test_hyperbola_respects_limit() {
        let pts: Vec<_> = rasterize_hyperbola(C, 20, 10, 60).collect();
        assert!(!pts.is_empty());
        assert!(pts.iter().all(|p| (p.x - C.x).abs() <= 60));
        assert!(pts.iter().all(|p| (p.x - C.x).abs() >= 20));
        assert!(pts.contains(&Pixel::new(120, 100)));
        assert!(pts.contains(&Pixel::new(80, 100)));
    }

    #[test]
    fn test_hyperbola_points_near_curve() {
        let (a, b) = (20.0, 15.0);
        for p in rasterize_hyperbola(C, 20, 15, 100) {
            let x = f64::from(p.x - C.x).abs();
            let y = f64::from(p.y - C.y).abs();
            let expected_y = b * ((x * x) / (a * a) - 1.0).max(0.0).sqrt();
            let expected_x = a * (1.0 + (y * y) / (b * b)).sqrt();
            assert!(
                (y - expected_y).abs() <= 1.0 || (x - expected_x).abs() <= 1.0,
                "{p:?}: expected x={expected_x} or y={expected_y}"
            );
        }
    }

    #[test]
    fn test_hyperbola_steep_asymptote_terminates() {
        // b > a keeps region 1 active; the limit still ends the walk.
        let n = rasterize_hyperbola(C, 5, 40, 30).count();
        assert!(n > 0);
    }

    #[test]
    fn test_hyperbola_vertex_beyond_limit_is_empty() {
        assert_eq!(rasterize_hyperbola(C, 50, 10, 40).count(), 0);
    }

    #[test]
    fn test_parabola_mirrored_pairs() {
        let pts: Vec<_> = rasterize_parabola(C, 5.0, 20).collect();
        assert_eq!(pts.len(), 42);
        assert_eq!(pts[0], C);
        assert_eq!(pts[1], C);
        // x = 20: y = 400 / 20 = 20, drawn above the vertex.
        assert_eq!(pts[40], Pixel::new(120, 80));
        assert_eq!(pts[41], Pixel::new(80, 80));
    }

    #[test]
    fn test_parabola_zero_focus_is_empty() {
        assert_eq!(rasterize_parabola(C, 0.0, 20).count(), 0);
    }

    #[test]
    fn test_rasterize_conic_dispatch() {
        let direct: Vec<_> = rasterize_ellipse(C, 8, 4).collect();
        let via: Vec<_> = rasterize_conic(C, ConicShape::Ellipse { a: 8, b: 4 }).collect();
        assert_eq!(direct, via);
    }
}
