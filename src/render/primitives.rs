//! Paint sinks and drawing of rasterizer output.
//!
//! Rasterizers only produce coordinates. A [`PixelSink`] turns them into
//! paint; [`Framebuffer`] is the sink used by the CLI and PNG output.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Line, Pixel, Point, Polygon, Span};
use crate::render::line::{rasterize_line, LineAlgorithm, LineSample};

/// Anything that accepts painted pixels.
pub trait PixelSink {
    /// Paint one pixel with coverage `intensity` in `[0, 1]`.
    ///
    /// Pixels outside the sink are ignored.
    fn plot(&mut self, pixel: Pixel, color: Rgba, intensity: f64);

    /// Paint a whole span at full intensity.
    fn plot_span(&mut self, span: Span, color: Rgba) {
        for p in span.pixels() {
            self.plot(p, color, 1.0);
        }
    }
}

impl PixelSink for Framebuffer {
    fn plot(&mut self, pixel: Pixel, color: Rgba, intensity: f64) {
        let (Ok(x), Ok(y)) = (u32::try_from(pixel.x), u32::try_from(pixel.y)) else {
            return;
        };
        if intensity >= 1.0 {
            self.set_pixel(x, y, color);
        } else if intensity > 0.0 {
            self.blend_pixel(x, y, color.with_intensity(intensity));
        }
    }

    fn plot_span(&mut self, span: Span, color: Rgba) {
        self.fill_span(span, color);
    }
}

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a sink.
    fn draw<S: PixelSink + ?Sized>(&self, sink: &mut S, color: Rgba);
}

// ============================================================================
// Painting iterators
// ============================================================================

/// Paint every pixel at full intensity. Returns the number painted.
pub fn paint_pixels<S, I>(sink: &mut S, pixels: I, color: Rgba) -> usize
where
    S: PixelSink + ?Sized,
    I: IntoIterator<Item = Pixel>,
{
    let mut n = 0;
    for p in pixels {
        sink.plot(p, color, 1.0);
        n += 1;
    }
    n
}

/// Paint line samples, blending Wu coverage. Returns the number painted.
pub fn paint_samples<S, I>(sink: &mut S, samples: I, color: Rgba) -> usize
where
    S: PixelSink + ?Sized,
    I: IntoIterator<Item = LineSample>,
{
    let mut n = 0;
    for s in samples {
        sink.plot(s.pixel, color, s.intensity.unwrap_or(1.0));
        n += 1;
    }
    n
}

/// Paint fill spans. Returns the number of spans painted.
pub fn paint_spans<S, I>(sink: &mut S, spans: I, color: Rgba) -> usize
where
    S: PixelSink + ?Sized,
    I: IntoIterator<Item = Span>,
{
    let mut n = 0;
    for span in spans {
        sink.plot_span(span, color);
        n += 1;
    }
    n
}

/// Connect consecutive points with rasterized segments.
pub fn paint_polyline<S>(sink: &mut S, points: &[Point], algorithm: LineAlgorithm, color: Rgba)
where
    S: PixelSink + ?Sized,
{
    for pair in points.windows(2) {
        let raster = rasterize_line(pair[0].to_pixel(), pair[1].to_pixel(), algorithm);
        paint_samples(sink, raster, color);
    }
}

// ============================================================================
// Drawable impls
// ============================================================================

impl Drawable for Pixel {
    fn draw<S: PixelSink + ?Sized>(&self, sink: &mut S, color: Rgba) {
        sink.plot(*self, color, 1.0);
    }
}

impl Drawable for Point {
    fn draw<S: PixelSink + ?Sized>(&self, sink: &mut S, color: Rgba) {
        sink.plot(self.to_pixel(), color, 1.0);
    }
}

impl Drawable for Line {
    fn draw<S: PixelSink + ?Sized>(&self, sink: &mut S, color: Rgba) {
        paint_polyline(sink, &[self.start, self.end], LineAlgorithm::Bresenham, color);
    }
}

/// Outline including the closing edge.
impl Drawable for Polygon {
    fn draw<S: PixelSink + ?Sized>(&self, sink: &mut S, color: Rgba) {
        for edge in self.edges() {
            edge.draw(sink, color);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
