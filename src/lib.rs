//! # Trueno-Raster
//!
//! Deterministic rasterization and computational-geometry kernel.
//!
//! Every algorithm turns geometric input into an ordered sequence of
//! integer pixel coordinates (or spans, or polygons) and is exposed as a
//! lazy iterator, so a caller can collect the whole result or step through
//! it one pixel at a time for visualization. Painting is decoupled from
//! rasterization through the [`render::PixelSink`] trait.
//!
//! ## Features
//!
//! - **Lines**: DDA, Bresenham, Wu anti-aliased
//! - **Conics**: midpoint circle, ellipse, hyperbola, parabola
//! - **Curves**: cubic Bezier, Hermite, uniform B-spline
//! - **Fills**: scanline edge table, pixel seed, scanline seed
//! - **Geometry**: Graham scan and Jarvis march hulls, convexity,
//!   point-in-polygon, Delaunay triangulation, Voronoi edges
//! - **3D**: homogeneous transforms and perspective wireframes via `glam`
//! - **Output**: PNG through a SIMD-backed [`framebuffer::Framebuffer`]
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let pixels: Vec<Pixel> = rasterize_line(Pixel::new(0, 0), Pixel::new(5, 2), LineAlgorithm::Bresenham)
//!     .map(|s| s.pixel)
//!     .collect();
//! assert_eq!(pixels.first(), Some(&Pixel::new(0, 0)));
//! assert_eq!(pixels.last(), Some(&Pixel::new(5, 2)));
//! ```
//!
//! ## References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Graham, R. L. (1972). "An efficient algorithm for determining the convex hull."
//! - Watson, D. F. (1981). "Computing the n-dimensional Delaunay tessellation."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in rasterization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// RGBA color type.
pub mod color;

/// Pixel buffer used as the default paint sink.
pub mod framebuffer;

/// Points, pixels, segments, polygons and spans.
pub mod geometry;

// ============================================================================
// Algorithm Modules
// ============================================================================

/// Convex hulls, convexity and point-in-polygon.
pub mod hull;

/// Rasterizers and polygon fill.
pub mod render;

/// Delaunay triangulation and Voronoi edges.
pub mod triangulation;

/// 3D transforms and projection.
pub mod transform;

// ============================================================================
// I/O Modules
// ============================================================================

/// Configuration loading.
pub mod config;

/// Mesh and point-list files.
pub mod mesh;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{
        orientation, Bounds, Line, Orientation, Pixel, Point, Point3, Polygon, Span,
    };
    pub use crate::hull::{convex_hull, is_convex, point_in_polygon, HullAlgorithm};
    pub use crate::mesh::{Mesh, MeshKind};
    pub use crate::output::PngEncoder;
    pub use crate::render::{
        fill, rasterize_conic, rasterize_line, sample_curve, ConicShape, CurveBasis, Drawable,
        FillAlgorithm, LineAlgorithm, PixelSink,
    };
    pub use crate::transform::{TransformAccumulator, Viewport};
    pub use crate::triangulation::{delaunay, voronoi_edges, Triangle};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

/// Re-export glam; transforms are [`glam::DMat4`].
pub use glam;
