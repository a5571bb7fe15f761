//! Homogeneous 3D transforms and perspective projection.
//!
//! Matrices are column-major [`DMat4`]s applied as `p' = M · p`. Composing
//! `A * B` applies `B` first.

use glam::{DMat4, DVec3, DVec4};

use crate::geometry::{Line, Point, Point3};
use crate::mesh::Mesh;

/// Translation by `(dx, dy, dz)`.
#[must_use]
pub fn translation(dx: f64, dy: f64, dz: f64) -> DMat4 {
    DMat4::from_translation(DVec3::new(dx, dy, dz))
}

/// Axis-aligned scale.
#[must_use]
pub fn scale(sx: f64, sy: f64, sz: f64) -> DMat4 {
    DMat4::from_scale(DVec3::new(sx, sy, sz))
}

/// Rotation about the X axis by `angle` radians.
#[must_use]
pub fn rotation_x(angle: f64) -> DMat4 {
    DMat4::from_rotation_x(angle)
}

/// Rotation about the Y axis by `angle` radians.
#[must_use]
pub fn rotation_y(angle: f64) -> DMat4 {
    DMat4::from_rotation_y(angle)
}

/// Rotation about the Z axis by `angle` radians.
#[must_use]
pub fn rotation_z(angle: f64) -> DMat4 {
    DMat4::from_rotation_z(angle)
}

/// Mirror through the YZ plane (negates x).
#[must_use]
pub fn mirror_x() -> DMat4 {
    scale(-1.0, 1.0, 1.0)
}

/// Mirror through the XZ plane (negates y).
#[must_use]
pub fn mirror_y() -> DMat4 {
    scale(1.0, -1.0, 1.0)
}

/// Mirror through the XY plane (negates z).
#[must_use]
pub fn mirror_z() -> DMat4 {
    scale(1.0, 1.0, -1.0)
}

/// Pinhole projection onto the plane at distance `d`: `w' = z / d`.
#[must_use]
pub fn perspective(d: f64) -> DMat4 {
    DMat4::from_cols(
        DVec4::new(1.0, 0.0, 0.0, 0.0),
        DVec4::new(0.0, 1.0, 0.0, 0.0),
        DVec4::new(0.0, 0.0, 1.0, 1.0 / d),
        DVec4::ZERO,
    )
}

/// Transform every point by `m`.
#[must_use]
pub fn apply(points: &[Point3], m: &DMat4) -> Vec<Point3> {
    points
        .iter()
        .map(|&p| Point3::from(*m * DVec4::from(p)))
        .collect()
}

/// Perspective-project a point and divide by `w'`.
///
/// Returns `None` when `w'` is (numerically) zero, i.e. the point lies in
/// the camera plane, or when `d` is zero or not finite.
#[must_use]
pub fn project(point: Point3, d: f64) -> Option<Point> {
    if d == 0.0 || !d.is_finite() {
        return None;
    }
    let v = perspective(d) * DVec4::from(point);
    if v.w.abs() < f64::EPSILON {
        return None;
    }
    Some(Point::new(v.x / v.w, v.y / v.w))
}

/// Screen mapping for projected points: origin at the canvas center, y up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Map a projected point to canvas coordinates.
    #[must_use]
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x + f64::from(self.width) / 2.0,
            -p.y + f64::from(self.height) / 2.0,
        )
    }
}

/// Screen-space segments for every mesh edge.
///
/// Vertices are transformed by `transform`, projected at distance `d` and
/// mapped through `viewport`. Edges with an unprojectable endpoint are
/// skipped.
#[must_use]
pub fn wireframe(mesh: &Mesh, transform: &DMat4, d: f64, viewport: Viewport) -> Vec<Line> {
    let screen: Vec<Option<Point>> = apply(mesh.vertices(), transform)
        .into_iter()
        .map(|p| project(p, d).map(|q| viewport.to_screen(q)))
        .collect();

    let lines: Vec<Line> = mesh
        .edges()
        .iter()
        .filter_map(|&(a, b)| Some(Line::new(screen[a]?, screen[b]?)))
        .collect();
    if lines.len() < mesh.edges().len() {
        log::warn!(
            "wireframe: skipped {} edges with unprojectable endpoints",
            mesh.edges().len() - lines.len()
        );
    }
    lines
}

/// Running transform for interactive manipulation.
///
/// Updates compose as `current = current · delta`. Since points map as
/// `p' = current · p`, the newest delta is applied to the mesh first and
/// the earlier ones act on its result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformAccumulator {
    current: DMat4,
}

impl Default for TransformAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformAccumulator {
    /// Start from the identity.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: DMat4::IDENTITY,
        }
    }

    /// Compose `delta` into the running transform.
    pub fn push(&mut self, delta: DMat4) -> &mut Self {
        self.current *= delta;
        self
    }

    /// The accumulated matrix.
    #[must_use]
    pub const fn current(&self) -> DMat4 {
        self.current
    }

    /// Back to the identity.
    pub fn reset(&mut self) {
        self.current = DMat4::IDENTITY;
    }

    /// Transform points by the accumulated matrix.
    #[must_use]
    pub fn apply(&self, points: &[Point3]) -> Vec<Point3> {
        apply(points, &self.current)
    }
}
