//! Rasterization and polygon fill.
//!
//! Every algorithm here is a lazy, `Clone` iterator: drive it one step per
//! tick for visualization, or `collect()` it; the output is the same. Cloning
//! an unstarted iterator restarts it.
//!
//! # Algorithms
//!
//! - **Lines**: DDA, Bresenham, Wu anti-aliased
//! - **Conics**: midpoint circle, two-region ellipse and hyperbola, parabola
//! - **Curves**: cubic Bezier, Hermite, uniform B-spline
//! - **Fills**: scanline edge table, pixel seed, scanline seed
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

pub mod conic;
pub mod curve;
pub mod fill;
pub mod line;
mod primitives;
pub mod seed_fill;

pub use conic::{
    rasterize_circle, rasterize_conic, rasterize_ellipse, rasterize_hyperbola,
    rasterize_parabola, ConicRaster, ConicShape,
};
pub use curve::{sample_curve, CurveBasis, CurveSampler};
pub use fill::{
    build_edge_table, fill, scanline_covers, Edge, FillAlgorithm, FillRaster, ScanlineFill,
};
pub use line::{rasterize_line, LineAlgorithm, LineRaster, LineSample};
pub use primitives::{
    paint_pixels, paint_polyline, paint_samples, paint_spans, Drawable, PixelSink,
};
pub use seed_fill::{PixelSeedFill, ScanlineSeedFill};
