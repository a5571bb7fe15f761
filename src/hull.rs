//! Convex hulls and polygon predicates.
//!
//! Everything here works in pixel space (y grows downward) using the
//! [`orientation`] predicate from [`crate::geometry`]. Hulls with fewer than
//! three vertices are reported empty; a hull never contains collinear
//! boundary points.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::{orientation, Line, Orientation, Point};

/// Convex hull algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HullAlgorithm {
    /// Angular sort around the lowest point, then a stack scan.
    #[default]
    Graham,
    /// Gift wrapping from the leftmost point.
    Jarvis,
}

impl HullAlgorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Self; 2] = [Self::Graham, Self::Jarvis];
}

impl fmt::Display for HullAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Graham => "graham",
            Self::Jarvis => "jarvis",
        })
    }
}

impl FromStr for HullAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "graham" => Ok(Self::Graham),
            "jarvis" => Ok(Self::Jarvis),
            _ => Err(Error::UnknownVariant {
                kind: "hull algorithm",
                name: s.to_string(),
            }),
        }
    }
}

/// Convex hull of `points` with the chosen algorithm.
#[must_use]
pub fn convex_hull(points: &[Point], algorithm: HullAlgorithm) -> Vec<Point> {
    let hull = match algorithm {
        HullAlgorithm::Graham => graham_scan(points),
        HullAlgorithm::Jarvis => jarvis_march(points),
    };
    log::debug!(
        "convex_hull {algorithm}: {} points -> {} hull vertices",
        points.len(),
        hull.len()
    );
    hull
}

fn degenerate(hull: Vec<Point>) -> Vec<Point> {
    if hull.len() < 3 {
        Vec::new()
    } else {
        hull
    }
}

/// Graham scan.
///
/// The pivot is the point with the lowest `y` (then lowest `x`). Remaining
/// points are ordered by polar angle around it, nearer points first on
/// ties, and the stack pops while the top two points and the candidate do
/// not make a [`Orientation::Right`] turn.
#[must_use]
pub fn graham_scan(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return Vec::new();
    }

    let Some(pivot) = points
        .iter()
        .copied()
        .min_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
    else {
        return Vec::new();
    };

    let mut rest: Vec<Point> = points.iter().copied().filter(|p| *p != pivot).collect();
    // All of `rest` lies in the half-plane y >= pivot.y, so the cross
    // product gives a total angular order.
    rest.sort_by(|a, b| {
        let cross = (*a - pivot).cross(*b - pivot);
        if cross > 0.0 {
            Ordering::Less
        } else if cross < 0.0 {
            Ordering::Greater
        } else {
            pivot
                .distance_squared(*a)
                .total_cmp(&pivot.distance_squared(*b))
        }
    });

    let mut stack = vec![pivot];
    for p in rest {
        while stack.len() >= 2 {
            let top = stack[stack.len() - 1];
            let below = stack[stack.len() - 2];
            if orientation(below, top, p) == Orientation::Right {
                break;
            }
            log::trace!("graham pop ({}, {})", top.x, top.y);
            stack.pop();
        }
        stack.push(p);
    }

    degenerate(stack)
}

/// Jarvis march (gift wrapping).
///
/// Starts at the leftmost point (then lowest `y`). From each hull vertex the
/// candidate is replaced by any point that makes a [`Orientation::Right`]
/// turn, or by a farther point on exact collinearity, so collinear boundary
/// points are skipped.
#[must_use]
pub fn jarvis_march(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return Vec::new();
    }

    let Some(start) = points
        .iter()
        .copied()
        .min_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
    else {
        return Vec::new();
    };

    let mut hull = Vec::new();
    let mut current = start;
    loop {
        hull.push(current);

        let Some(mut candidate) = points.iter().copied().find(|p| *p != current) else {
            break;
        };
        for &r in points {
            match orientation(current, candidate, r) {
                Orientation::Right => candidate = r,
                Orientation::Collinear
                    if current.distance_squared(r) > current.distance_squared(candidate) =>
                {
                    candidate = r;
                }
                _ => {}
            }
        }

        log::trace!("jarvis step ({}, {})", candidate.x, candidate.y);
        current = candidate;
        if current == start {
            break;
        }
        if hull.len() > points.len() {
            log::warn!("jarvis march did not close after {} steps", hull.len());
            break;
        }
    }

    degenerate(hull)
}

/// True when the polygon's own vertex order never changes turn direction.
///
/// Collinear triples are ignored; fewer than three vertices is not convex.
#[must_use]
pub fn is_convex(vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut turn = Orientation::Collinear;
    for i in 0..n {
        let o = orientation(vertices[i], vertices[(i + 1) % n], vertices[(i + 2) % n]);
        match (turn, o) {
            (_, Orientation::Collinear) => {}
            (Orientation::Collinear, o) => turn = o,
            (t, o) if t != o => return false,
            _ => {}
        }
    }
    true
}

/// Ray-casting containment with the half-open rule.
///
/// A horizontal ray from `point` crosses edge `(x0,y0)-(x1,y1)` when
/// `min(y0,y1) < y <= max(y0,y1)`. Horizontal edges never satisfy that, and
/// a point exactly on a crossed edge counts as inside. Appending the first
/// vertex again does not change the result.
#[must_use]
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let Some(&last) = vertices.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;
    for &cur in vertices {
        let (lo, hi) = if prev.y < cur.y {
            (prev.y, cur.y)
        } else {
            (cur.y, prev.y)
        };
        if lo < point.y && point.y <= hi && point.x <= prev.x.max(cur.x) {
            let x_cross = if prev.y == cur.y {
                prev.x
            } else {
                (point.y - prev.y) * (cur.x - prev.x) / (cur.y - prev.y) + prev.x
            };
            if point.x <= x_cross {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

/// Every intersection of `segment` with the polygon's edges, closing edge
/// included, in edge order.
#[must_use]
pub fn segment_polygon_intersections(segment: &Line, vertices: &[Point]) -> Vec<Point> {
    let n = vertices.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .filter_map(|i| segment.intersection(&Line::new(vertices[i], vertices[(i + 1) % n])))
        .collect()
}
