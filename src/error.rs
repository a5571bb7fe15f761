//! Error types for trueno-raster operations.
//!
//! Degenerate geometry (zero-length lines, fewer than three polygon
//! vertices, parallel segments) is never an error: the kernel returns the
//! trivial result instead. Errors are reserved for I/O, malformed input
//! files and caller mistakes that cannot produce a meaningful result.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-raster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or fill bounds.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A mesh vertex line could not be parsed.
    #[error("Mesh parse error on line {line}: {reason}")]
    MeshParse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Mesh edge topology does not fit the loaded vertices.
    #[error("Mesh topology error: edge ({a}, {b}) references a vertex beyond {vertex_count}")]
    MeshTopology {
        /// First edge index.
        a: usize,
        /// Second edge index.
        b: usize,
        /// Number of loaded vertices.
        vertex_count: usize,
    },

    /// A mesh file holds a different number of vertices than its kind.
    #[error("Mesh vertex count: {kind} expects {expected} vertices, found {found}")]
    MeshVertexCount {
        /// Mesh kind name.
        kind: String,
        /// Vertices the kind's edges use.
        expected: usize,
        /// Vertices in the file.
        found: usize,
    },

    /// A point-list line could not be parsed.
    #[error("Point list parse error on line {line}: {reason}")]
    PointListParse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Seed pixel for a flood fill is outside the polygon or the canvas.
    #[error("Seed ({x}, {y}) is not inside the polygon")]
    SeedOutsidePolygon {
        /// Seed x coordinate.
        x: i32,
        /// Seed y coordinate.
        y: i32,
    },

    /// A flood fill was requested without a seed pixel.
    #[error("Fill algorithm {algorithm} needs a seed pixel")]
    MissingSeed {
        /// Requested algorithm name.
        algorithm: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An algorithm or variant name was not recognised.
    #[error("Unknown {kind}: {name}")]
    UnknownVariant {
        /// Which enumeration was being parsed.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },
}
