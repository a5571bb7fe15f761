//! Geometric primitives shared by every kernel component.
//!
//! Real coordinates are `f64`; rasterizer output is integer [`Pixel`]s.
//! All predicates work in pixel space where the y axis grows downward.

use std::ops::{Add, Mul, Sub};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance, for comparisons that must stay exact.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// 2D cross product (z component of the 3D cross product).
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Round to the nearest pixel.
    #[must_use]
    pub fn to_pixel(self) -> Pixel {
        Pixel::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Pixel> for Point {
    fn from(p: Pixel) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pixel {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Pixel {
    /// Create a new pixel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A homogeneous 3D point. `w` stays 1 until the perspective divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Homogeneous weight.
    pub w: f64,
}

impl Point3 {
    /// Create a point with `w = 1`.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Create a point with an explicit weight.
    #[must_use]
    pub const fn homogeneous(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<glam::DVec4> for Point3 {
    fn from(v: glam::DVec4) -> Self {
        Self::homogeneous(v.x, v.y, v.z, v.w)
    }
}

impl From<Point3> for glam::DVec4 {
    fn from(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z, p.w)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Get the length of the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Intersection point with another segment.
    ///
    /// Solves the 2x2 system for the parameters `t` (along `self`) and `u`
    /// (along `other`) and accepts the hit when both lie in `[0, 1]`.
    /// Parallel and coincident segments (zero determinant) report `None`;
    /// overlapping collinear segments are a known limitation.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        let (p1, p2) = (self.start, self.end);
        let (p3, p4) = (other.start, other.end);

        let d = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
        if d == 0.0 {
            return None;
        }

        let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / d;
        let u = ((p1.x - p3.x) * (p1.y - p2.y) - (p1.y - p3.y) * (p1.x - p2.x)) / d;

        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(p1.lerp(p2, t))
        } else {
            None
        }
    }
}

/// Turn direction of three points in pixel space (y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counter-clockwise on screen; `(q-p)×(r-q) < 0`.
    Left,
    /// Clockwise on screen; `(q-p)×(r-q) > 0`.
    Right,
    /// Exactly collinear.
    Collinear,
}

/// Classify the turn `p → q → r`.
///
/// Uses the exact sign of `(q-p)×(r-q)` with no epsilon; callers that want
/// tolerance must quantize their coordinates first.
#[must_use]
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let cross = (q - p).cross(r - q);
    if cross > 0.0 {
        Orientation::Right
    } else if cross < 0.0 {
        Orientation::Left
    } else {
        Orientation::Collinear
    }
}

/// An ordered, implicitly closed polygon.
///
/// Insertion order defines edge adjacency; the last vertex connects back to
/// the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its vertices.
    #[must_use]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Create a polygon from integer pixel vertices.
    #[must_use]
    pub fn from_pixels(pixels: &[Pixel]) -> Self {
        Self::new(pixels.iter().copied().map(Point::from).collect())
    }

    /// Vertex slice in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a vertex.
    pub fn push(&mut self, vertex: Point) {
        self.vertices.push(vertex);
    }

    /// True once there are enough vertices for fills, hulls and containment.
    #[must_use]
    pub fn is_closed_shape(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Edges in order, including the closing edge from last to first.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Line::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Ray-casting containment test (see [`crate::hull::point_in_polygon`]).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        crate::hull::point_in_polygon(point, &self.vertices)
    }

    /// Convexity of the vertex order (see [`crate::hull::is_convex`]).
    #[must_use]
    pub fn is_convex(&self) -> bool {
        crate::hull::is_convex(&self.vertices)
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

/// A horizontal run of pixels on one row, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Row.
    pub y: i32,
    /// First column.
    pub x_start: i32,
    /// Last column (inclusive).
    pub x_end: i32,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub const fn new(y: i32, x_start: i32, x_end: i32) -> Self {
        Self { y, x_start, x_end }
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.x_end < self.x_start {
            0
        } else {
            (self.x_end - self.x_start + 1) as usize
        }
    }

    /// True when the span covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_end < self.x_start
    }

    /// The pixels of this span from left to right.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> {
        let y = self.y;
        (self.x_start..=self.x_end).map(move |x| Pixel::new(x, y))
    }
}

/// Canvas extent used to bound flood fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Bounds {
    /// Create bounds.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a pixel lies on the canvas.
    #[must_use]
    pub fn contains(&self, p: Pixel) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }
}
