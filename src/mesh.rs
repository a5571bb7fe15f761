//! Wireframe meshes and point-list files.
//!
//! Mesh files hold one `x y z` vertex per line with no header. Edge
//! topology is not stored in the file; it comes from the [`MeshKind`].
//! Point-list files hold one `x y` pair per line.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::{Point, Point3};

const BOX_EDGES: &[(usize, usize)] = &[
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

const PYRAMID_EDGES: &[(usize, usize)] = &[
    (0, 1), (0, 2), (0, 3), (0, 4),
    (1, 2), (2, 3), (3, 4), (4, 1),
];

const TETRAHEDRON_EDGES: &[(usize, usize)] = &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Known solids and their fixed edge lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Eight vertices, two quads joined at the corners.
    Cube,
    /// Apex at vertex 0 over a four-vertex base.
    Pyramid,
    /// Four vertices, all pairs connected.
    Tetrahedron,
    /// Same topology as the cube.
    Prism,
}

impl MeshKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 4] = [Self::Cube, Self::Pyramid, Self::Tetrahedron, Self::Prism];

    /// Edge list as vertex index pairs.
    #[must_use]
    pub const fn edges(self) -> &'static [(usize, usize)] {
        match self {
            Self::Cube | Self::Prism => BOX_EDGES,
            Self::Pyramid => PYRAMID_EDGES,
            Self::Tetrahedron => TETRAHEDRON_EDGES,
        }
    }

    /// Vertices the edge list expects.
    #[must_use]
    pub const fn vertex_count(self) -> usize {
        match self {
            Self::Cube | Self::Prism => 8,
            Self::Pyramid => 5,
            Self::Tetrahedron => 4,
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cube => "cube",
            Self::Pyramid => "pyramid",
            Self::Tetrahedron => "tetrahedron",
            Self::Prism => "prism",
        })
    }
}

impl FromStr for MeshKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cube" => Ok(Self::Cube),
            "pyramid" => Ok(Self::Pyramid),
            "tetrahedron" => Ok(Self::Tetrahedron),
            "prism" => Ok(Self::Prism),
            _ => Err(Error::UnknownVariant {
                kind: "mesh kind",
                name: s.to_string(),
            }),
        }
    }
}

/// Vertices plus edge topology.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    edges: Vec<(usize, usize)>,
}

impl Mesh {
    /// Build a mesh, checking every edge against the vertex count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MeshTopology`] for an out-of-range edge index.
    pub fn new(vertices: Vec<Point3>, edges: Vec<(usize, usize)>) -> Result<Self> {
        if let Some(&(a, b)) = edges
            .iter()
            .find(|(a, b)| *a >= vertices.len() || *b >= vertices.len())
        {
            return Err(Error::MeshTopology {
                a,
                b,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, edges })
    }

    /// Parse mesh text with the topology of `kind`.
    ///
    /// Blank lines are skipped. The whole text is rejected on the first
    /// malformed line, including non-finite coordinates.
    ///
    /// # Errors
    ///
    /// [`Error::MeshParse`] for a bad line, [`Error::MeshVertexCount`] when
    /// the vertex count does not match `kind`.
    pub fn parse(text: &str, kind: MeshKind) -> Result<Self> {
        let mut vertices = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let [x, y, z] = parse_fields::<3>(line).map_err(|reason| Error::MeshParse {
                line: i + 1,
                reason,
            })?;
            vertices.push(Point3::new(x, y, z));
        }
        log::debug!("parsed {kind} mesh: {} vertices", vertices.len());
        if vertices.len() != kind.vertex_count() {
            return Err(Error::MeshVertexCount {
                kind: kind.to_string(),
                expected: kind.vertex_count(),
                found: vertices.len(),
            });
        }
        Self::new(vertices, kind.edges().to_vec())
    }

    /// Load a mesh file with the topology of `kind`.
    ///
    /// # Errors
    ///
    /// I/O failures plus everything [`Mesh::parse`] reports.
    pub fn load<P: AsRef<Path>>(path: P, kind: MeshKind) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text, kind)
    }

    /// Vertices in file order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Edges as vertex index pairs.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

fn parse_fields<const N: usize>(line: &str) -> std::result::Result<[f64; N], String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != N {
        return Err(format!("expected {N} fields, found {}", fields.len()));
    }
    let mut out = [0.0; N];
    for (slot, field) in out.iter_mut().zip(&fields) {
        let value: f64 = field
            .parse()
            .map_err(|_| format!("not a number: {field:?}"))?;
        if !value.is_finite() {
            return Err(format!("not a finite number: {field:?}"));
        }
        *slot = value;
    }
    Ok(out)
}

// ============================================================================
// Point lists
// ============================================================================

/// Parse `x y` lines into points. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`Error::PointListParse`] on the first malformed line.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let [x, y] = parse_fields::<2>(line).map_err(|reason| Error::PointListParse {
            line: i + 1,
            reason,
        })?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

/// Format points one `x y` pair per line.
#[must_use]
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{} {}\n", p.x, p.y))
        .collect()
}

/// Load a point-list file.
///
/// # Errors
///
/// I/O failures plus everything [`parse_points`] reports.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let text = fs::read_to_string(path.as_ref())?;
    let points = parse_points(&text)?;
    log::debug!("loaded {} points from {}", points.len(), path.as_ref().display());
    Ok(points)
}

/// Write a point-list file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<()> {
    fs::write(path, format_points(points))?;
    Ok(())
}
