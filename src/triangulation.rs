//! Delaunay triangulation (Bowyer–Watson) and the finite Voronoi edges
//! derived from it.
//!
//! Points are inserted one at a time into a triangulation seeded with a
//! super-triangle. Each insertion removes every triangle whose circumcircle
//! strictly contains the new point and re-triangulates the hole from its
//! boundary. Triangles touching the super-triangle are discarded at the end.

use std::collections::{HashMap, HashSet};

use crate::geometry::{orientation, Line, Orientation, Point};

/// Scale of the super-triangle relative to the input's bounding box.
const SUPER_SCALE: f64 = 100.0;

/// A triangle as indices into the input point slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// First vertex index.
    pub a: usize,
    /// Second vertex index.
    pub b: usize,
    /// Third vertex index.
    pub c: usize,
}

impl Triangle {
    /// Create a triangle from three indices.
    #[must_use]
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Resolve the corner points.
    #[must_use]
    pub fn corners(&self, points: &[Point]) -> [Point; 3] {
        [points[self.a], points[self.b], points[self.c]]
    }

    /// The three edges as index pairs, smaller index first.
    #[must_use]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [
            sorted_pair(self.a, self.b),
            sorted_pair(self.b, self.c),
            sorted_pair(self.c, self.a),
        ]
    }

    fn touches(&self, index: usize) -> bool {
        self.a >= index || self.b >= index || self.c >= index
    }
}

fn sorted_pair(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

/// Circumcenter and squared radius, or `None` for collinear corners.
#[must_use]
pub fn circumcircle(a: Point, b: Point, c: Point) -> Option<(Point, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == 0.0 {
        return None;
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let center = Point::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    );
    Some((center, center.distance_squared(a)))
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    tri: Triangle,
    center: Point,
    radius_sq: f64,
}

impl Cell {
    fn new(tri: Triangle, points: &[Point]) -> Self {
        let [a, b, c] = tri.corners(points);
        match circumcircle(a, b, c) {
            Some((center, radius_sq)) => Self {
                tri,
                center,
                radius_sq,
            },
            // A flat triangle is replaced by the next insertion.
            None => Self {
                tri,
                center: a,
                radius_sq: f64::INFINITY,
            },
        }
    }

    fn encloses(&self, p: Point) -> bool {
        self.center.distance_squared(p) < self.radius_sq
    }
}

/// Delaunay triangulation of `points`.
///
/// Returned triangles index into `points` and turn
/// [`Orientation::Right`]. Repeated points are ignored after their first
/// occurrence. Fewer than three distinct points, or all points collinear,
/// produce no triangles.
#[must_use]
pub fn delaunay(points: &[Point]) -> Vec<Triangle> {
    let mut seen = HashSet::with_capacity(points.len());
    let unique: Vec<usize> = (0..points.len())
        .filter(|&i| seen.insert((points[i].x.to_bits(), points[i].y.to_bits())))
        .collect();
    if unique.len() < 3 {
        return Vec::new();
    }

    let (mut min, mut max) = (points[unique[0]], points[unique[0]]);
    for &i in &unique {
        let p = points[i];
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    let span = (max.x - min.x).max(max.y - min.y).max(1.0) * SUPER_SCALE;
    let mid = (min + max) * 0.5;

    // Working set: unique input points, then the three super vertices.
    let mut work: Vec<Point> = unique.iter().map(|&i| points[i]).collect();
    let n = work.len();
    work.push(Point::new(mid.x - 2.0 * span, mid.y - span));
    work.push(Point::new(mid.x, mid.y + 2.0 * span));
    work.push(Point::new(mid.x + 2.0 * span, mid.y - span));

    let mut cells = vec![Cell::new(Triangle::new(n, n + 1, n + 2), &work)];

    for i in 0..n {
        let p = work[i];
        let (bad, keep): (Vec<Cell>, Vec<Cell>) = cells.into_iter().partition(|c| c.encloses(p));

        let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
        for cell in &bad {
            for e in cell.tri.edges() {
                *edge_count.entry(e).or_insert(0) += 1;
            }
        }

        cells = keep;
        for cell in &bad {
            for (u, v) in cell.tri.edges() {
                if edge_count.get(&(u, v)) == Some(&1) {
                    cells.push(Cell::new(Triangle::new(u, v, i), &work));
                }
            }
        }
        log::trace!(
            "delaunay insert #{i}: removed {} triangles, now {}",
            bad.len(),
            cells.len()
        );
    }

    let triangles: Vec<Triangle> = cells
        .into_iter()
        .filter(|c| !c.tri.touches(n))
        .filter_map(|c| {
            let [a, b, cc] = c.tri.corners(&work);
            let t = Triangle::new(unique[c.tri.a], unique[c.tri.b], unique[c.tri.c]);
            match orientation(a, b, cc) {
                Orientation::Right => Some(t),
                Orientation::Left => Some(Triangle::new(t.a, t.c, t.b)),
                Orientation::Collinear => None,
            }
        })
        .collect();

    log::debug!("delaunay: {} points -> {} triangles", points.len(), triangles.len());
    triangles
}

/// Finite Voronoi edges of `points`.
///
/// One segment per Delaunay edge shared by two triangles, joining their
/// circumcenters. Unbounded Voronoi rays on the hull are not produced.
#[must_use]
pub fn voronoi_edges(points: &[Point]) -> Vec<Line> {
    let triangles = delaunay(points);

    let mut owners: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (t, tri) in triangles.iter().enumerate() {
        for e in tri.edges() {
            owners.entry(e).or_default().push(t);
        }
    }

    let centers: Vec<Option<Point>> = triangles
        .iter()
        .map(|t| {
            let [a, b, c] = t.corners(points);
            circumcircle(a, b, c).map(|(center, _)| center)
        })
        .collect();

    let mut shared: Vec<_> = owners.into_iter().filter(|(_, ts)| ts.len() == 2).collect();
    shared.sort_unstable_by_key(|(e, _)| *e);

    let edges: Vec<Line> = shared
        .into_iter()
        .filter_map(|(_, ts)| Some(Line::new(centers[ts[0]]?, centers[ts[1]]?)))
        .collect();
    log::debug!("voronoi: {} finite edges", edges.len());
    edges
}
