//! Polygon scan-conversion.
//!
//! The edge table is rebuilt for every fill request. A sweep moves edges
//! from the pending list into the active list as the scanline reaches
//! their `y_min`, retires them at `y_max`, and fills between consecutive
//! pairs of active edges (odd-even rule).
//!
//! Rows are half-open: an edge covers scanlines `y_min ≤ y < y_max`, and a
//! span covers columns `x_left ≤ x < x_right`.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Pixel, Point, Polygon, Span};
use crate::render::seed_fill::{PixelSeedFill, ScanlineSeedFill};

/// Tolerance used when snapping accumulated edge positions to columns.
const SNAP: f64 = 1e-9;

/// Polygon fill strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillAlgorithm {
    /// Scanline fill with an edge list scanned in `y_min` order.
    OrderedEdgeList,
    /// Scanline fill with an incrementally maintained active edge table.
    ///
    /// Produces exactly the same spans as [`FillAlgorithm::OrderedEdgeList`].
    ActiveEdgeList,
    /// Stack-based 4-connected flood from a seed pixel.
    PixelSeed(Pixel),
    /// Span-based flood from a seed pixel.
    ScanlineSeed(Pixel),
}

impl FillAlgorithm {
    /// Accepted names, in menu order.
    pub const NAMES: [&'static str; 4] = ["ordered", "active", "pixel-seed", "scanline-seed"];

    /// Resolve a name, attaching `seed` for the flood variants.
    ///
    /// # Errors
    ///
    /// Fails on an unknown name, or a flood variant without a seed.
    pub fn from_name(name: &str, seed: Option<Pixel>) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        let seeded = |make: fn(Pixel) -> Self| {
            seed.map(make).ok_or_else(|| Error::MissingSeed {
                algorithm: name.to_string(),
            })
        };
        match lower.as_str() {
            "ordered" | "ordered-edge-list" => Ok(Self::OrderedEdgeList),
            "active" | "active-edge-list" => Ok(Self::ActiveEdgeList),
            "pixel-seed" => seeded(Self::PixelSeed),
            "scanline-seed" => seeded(Self::ScanlineSeed),
            _ => Err(Error::UnknownVariant {
                kind: "fill algorithm",
                name: name.to_string(),
            }),
        }
    }

    /// Seed pixel of a flood variant.
    #[must_use]
    pub const fn seed(&self) -> Option<Pixel> {
        match self {
            Self::OrderedEdgeList | Self::ActiveEdgeList => None,
            Self::PixelSeed(p) | Self::ScanlineSeed(p) => Some(*p),
        }
    }
}

impl fmt::Display for FillAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderedEdgeList => f.write_str("ordered"),
            Self::ActiveEdgeList => f.write_str("active"),
            Self::PixelSeed(p) => write!(f, "pixel-seed@({}, {})", p.x, p.y),
            Self::ScanlineSeed(p) => write!(f, "scanline-seed@({}, {})", p.x, p.y),
        }
    }
}

/// Fill `polygon` with the chosen algorithm.
///
/// Seed fills are confined to `bounds` and fail with
/// [`Error::SeedOutsidePolygon`](crate::Error::SeedOutsidePolygon) when the
/// seed is not interior. Scanline fills ignore `bounds`; the sink clips.
pub fn fill(polygon: &Polygon, algorithm: FillAlgorithm, bounds: Bounds) -> Result<FillRaster<'_>> {
    log::debug!("fill {algorithm}: {} vertices", polygon.len());
    Ok(match algorithm {
        FillAlgorithm::OrderedEdgeList | FillAlgorithm::ActiveEdgeList => {
            FillRaster::Scanline(ScanlineFill::new(polygon))
        }
        FillAlgorithm::PixelSeed(seed) => {
            FillRaster::PixelSeed(PixelSeedFill::new(polygon.vertices(), seed, bounds)?)
        }
        FillAlgorithm::ScanlineSeed(seed) => {
            FillRaster::ScanlineSeed(ScanlineSeedFill::new(polygon.vertices(), seed, bounds)?)
        }
    })
}

/// Spans produced by any fill algorithm. Pixel seed fill yields
/// one-pixel spans in visiting order.
#[derive(Debug, Clone)]
pub enum FillRaster<'a> {
    /// Edge-table sweep.
    Scanline(ScanlineFill),
    /// Pixel flood.
    PixelSeed(PixelSeedFill<'a>),
    /// Span flood.
    ScanlineSeed(ScanlineSeedFill<'a>),
}

impl Iterator for FillRaster<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        match self {
            Self::Scanline(it) => it.next(),
            Self::PixelSeed(it) => it.next().map(|p| Span::new(p.y, p.x, p.x)),
            Self::ScanlineSeed(it) => it.next(),
        }
    }
}

/// One non-horizontal polygon edge, normalized so `y_min < y_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First scanline the edge covers.
    pub y_min: i32,
    /// First scanline past the edge.
    pub y_max: i32,
    /// Edge x on scanline `y_min`.
    pub x_at_y_min: f64,
    /// `dx / dy`.
    pub inverse_slope: f64,
}

impl Edge {
    /// Build an edge between two vertices, or `None` when it crosses no
    /// scanline (horizontal edges included).
    #[must_use]
    pub fn between(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        let (lo, hi) = if a.y < b.y { (a, b) } else { (b, a) };

        let y_min = lo.y.ceil();
        let y_max = hi.y.ceil();
        if y_min >= y_max {
            return None;
        }

        let inverse_slope = (hi.x - lo.x) / (hi.y - lo.y);
        Some(Self {
            y_min: y_min as i32,
            y_max: y_max as i32,
            x_at_y_min: lo.x + (y_min - lo.y) * inverse_slope,
            inverse_slope,
        })
    }

    /// Edge x on scanline `y`.
    #[must_use]
    pub fn x_at(&self, y: i32) -> f64 {
        self.x_at_y_min + f64::from(y - self.y_min) * self.inverse_slope
    }
}

/// True when the scanline sweep of `vertices` paints `pixel`.
///
/// Uses the sweep's own sampling: rows `y_min ≤ y < y_max` on the
/// ceil-quantized edges and columns `x_left ≤ x < x_right`, counted with
/// the odd-even rule.
#[must_use]
pub fn scanline_covers(vertices: &[Point], pixel: Pixel) -> bool {
    let Some(&last) = vertices.last() else {
        return false;
    };
    if vertices.len() < 3 {
        return false;
    }

    let x = f64::from(pixel.x) + SNAP;
    let mut prev = last;
    let mut crossings = 0usize;
    for &cur in vertices {
        if let Some(e) = Edge::between(prev, cur) {
            if e.y_min <= pixel.y && pixel.y < e.y_max && e.x_at(pixel.y) <= x {
                crossings += 1;
            }
        }
        prev = cur;
    }
    crossings % 2 == 1
}

/// Build the edge table for `polygon`, sorted ascending by `y_min`.
#[must_use]
pub fn build_edge_table(polygon: &Polygon) -> Vec<Edge> {
    let mut edges: Vec<Edge> = polygon
        .edges()
        .filter_map(|line| Edge::between(line.start, line.end))
        .collect();
    edges.sort_by_key(|e| e.y_min);
    edges
}

#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    x: f64,
    y_max: i32,
    inverse_slope: f64,
}

/// Scanline sweep over an edge table.
///
/// Iterating yields spans row by row; [`ScanlineFill::next_scanline`]
/// advances exactly one scanline for step-by-step drivers.
#[derive(Debug, Clone)]
pub struct ScanlineFill {
    pending: VecDeque<Edge>,
    active: Vec<ActiveEdge>,
    y: i32,
    row: VecDeque<Span>,
}

impl ScanlineFill {
    /// Start a sweep. Polygons with fewer than three vertices fill nothing.
    #[must_use]
    pub fn new(polygon: &Polygon) -> Self {
        let pending: VecDeque<Edge> = if polygon.is_closed_shape() {
            build_edge_table(polygon).into()
        } else {
            VecDeque::new()
        };
        let y = pending.front().map_or(0, |e| e.y_min);
        Self {
            pending,
            active: Vec::new(),
            y,
            row: VecDeque::new(),
        }
    }

    /// Current scanline.
    #[must_use]
    pub fn scanline(&self) -> i32 {
        self.y
    }

    /// True once both edge lists are exhausted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }

    /// Process one scanline and return its spans.
    ///
    /// Returns `None` once both the pending and active lists are empty. A
    /// row may legitimately produce no spans.
    pub fn next_scanline(&mut self) -> Option<Vec<Span>> {
        loop {
            if self.is_finished() {
                return None;
            }
            if self.active.is_empty() {
                if let Some(front) = self.pending.front() {
                    self.y = self.y.max(front.y_min);
                }
            }

            let y = self.y;
            while self.pending.front().is_some_and(|e| e.y_min <= y) {
                if let Some(e) = self.pending.pop_front() {
                    self.active.push(ActiveEdge {
                        x: e.x_at_y_min,
                        y_max: e.y_max,
                        inverse_slope: e.inverse_slope,
                    });
                }
            }
            self.active.retain(|e| e.y_max > y);
            if self.active.is_empty() {
                continue;
            }

            self.active.sort_by(|a, b| a.x.total_cmp(&b.x));

            let spans: Vec<Span> = self
                .active
                .chunks_exact(2)
                .filter_map(|pair| {
                    let x_start = (pair[0].x - SNAP).ceil() as i32;
                    let x_end = (pair[1].x - SNAP).ceil() as i32 - 1;
                    (x_start <= x_end).then(|| Span::new(y, x_start, x_end))
                })
                .collect();
            log::trace!("scanline {y}: {} active edges, {} spans", self.active.len(), spans.len());

            for edge in &mut self.active {
                edge.x += edge.inverse_slope;
            }
            self.y += 1;
            return Some(spans);
        }
    }
}

impl Iterator for ScanlineFill {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if let Some(span) = self.row.pop_front() {
                return Some(span);
            }
            self.row = self.next_scanline()?.into();
        }
    }
}
