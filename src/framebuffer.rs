//! RGBA framebuffer used as the default paint sink.
//!
//! Rows are padded to a 64-byte stride so every row starts on a SIMD
//! boundary. Luminance reductions run through trueno.

use std::ops::Range;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Bounds, Span};
use trueno::{Backend, Vector};

/// Row alignment in bytes (one AVX-512 register).
const ROW_ALIGN: usize = 64;

/// BT.709 luma weights.
const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Row-major RGBA canvas with aligned rows.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(600, 400).unwrap();
    /// assert_eq!((fb.width(), fb.height()), (600, 400));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let stride = (width as usize * 4).next_multiple_of(ROW_ALIGN);
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Canvas extent, for bounding seed fills.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Bytes per row including padding.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Visible pixel count.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte range of columns `x0..=x1` on row `y`. Callers clip first.
    fn byte_range(&self, y: u32, x0: u32, x1: u32) -> Range<usize> {
        let base = y as usize * self.stride;
        base + x0 as usize * 4..base + (x1 as usize + 1) * 4
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| self.byte_range(y, x, x).start)
    }

    /// Visible bytes of row `y`, without padding.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        (y < self.height).then(|| &self.data[self.byte_range(y, 0, self.width - 1)])
    }

    /// Paint every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let right = self.width as i32 - 1;
        for y in 0..self.height as i32 {
            self.fill_span(Span::new(y, 0, right), color);
        }
    }

    /// Paint an inclusive span, clipped to the canvas.
    pub fn fill_span(&mut self, span: Span, color: Rgba) {
        let Ok(y) = u32::try_from(span.y) else {
            return;
        };
        let x0 = span.x_start.max(0);
        let x1 = span.x_end.min(self.width as i32 - 1);
        if y >= self.height || x0 > x1 {
            return;
        }

        let rgba = color.to_array();
        let range = self.byte_range(y, x0 as u32, x1 as u32);
        for px in self.data[range].chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Color at `(x, y)`, or `None` off the canvas.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.offset(x, y)?;
        let px: [u8; 4] = self.data[i..i + 4].try_into().ok()?;
        Some(Rgba::from_array(px))
    }

    /// Overwrite `(x, y)`. Off-canvas writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Composite `color` over `(x, y)` with the "over" operator.
    ///
    /// Off-canvas writes are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(i) = self.offset(x, y) else {
            return;
        };

        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.data[i + 3]) / 255.0;
        let keep = dst_a * (1.0 - src_a);
        let out_a = src_a + keep;
        if out_a <= 0.0 {
            return;
        }

        let src = [color.r, color.g, color.b];
        for (c, &s) in src.iter().enumerate() {
            let d = f32::from(self.data[i + c]);
            let mixed = (f32::from(s) * src_a + d * keep) / out_a;
            self.data[i + c] = mixed.round() as u8;
        }
        self.data[i + 3] = (out_a * 255.0).round() as u8;
    }

    /// Pixels that differ from `background`.
    #[must_use]
    pub fn painted_count(&self, background: Rgba) -> usize {
        let bg = background.to_array();
        (0..self.height)
            .filter_map(|y| self.row(y))
            .flat_map(|row| row.chunks_exact(4))
            .filter(|px| *px != bg)
            .count()
    }

    /// `(min, max, mean)` BT.709 luminance, reduced with trueno.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luma: Vec<f32> = (0..self.height)
            .filter_map(|y| self.row(y))
            .flat_map(|row| row.chunks_exact(4))
            .map(|px| {
                LUMA.iter()
                    .zip(px)
                    .map(|(w, &c)| w * f32::from(c))
                    .sum::<f32>()
            })
            .collect();

        let v = Vector::from_vec(luma);
        (
            v.min().unwrap_or(0.0),
            v.max().unwrap_or(0.0),
            v.mean().unwrap_or(0.0),
        )
    }

    /// Tightly packed RGBA rows, as PNG expects.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        (0..self.height)
            .filter_map(|y| self.row(y))
            .flatten()
            .copied()
            .collect()
    }

    /// SIMD backend trueno picked for this machine.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_aligns_rows() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.pixel_count(), 5000);
        assert_eq!(fb.stride(), 448);
        assert_eq!(fb.bounds(), Bounds::new(100, 50));
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Framebuffer::new(0, 100),
            Err(Error::InvalidDimensions { width: 0, height: 100 })
        ));
        assert!(Framebuffer::new(100, 0).is_err());
    }

    #[test]
    fn test_clear_leaves_padding_untouched() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.clear(Rgba::RED);
        assert_eq!(fb.painted_count(Rgba::RED), 0);
        // Padding bytes after the first row stay zero.
        assert!(fb.data[12..fb.stride()].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_span_clips() {
        let mut fb = Framebuffer::new(10, 5).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_span(Span::new(2, -3, 3), Rgba::BLUE);
        fb.fill_span(Span::new(3, 8, 20), Rgba::BLUE);
        fb.fill_span(Span::new(-1, 0, 9), Rgba::BLUE);
        fb.fill_span(Span::new(7, 0, 9), Rgba::BLUE);
        fb.fill_span(Span::new(1, 5, 4), Rgba::BLUE);

        assert_eq!(fb.get_pixel(0, 2), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(3, 2), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(4, 2), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(9, 3), Some(Rgba::BLUE));
        assert_eq!(fb.painted_count(Rgba::WHITE), 4 + 2);
    }

    #[test]
    fn test_off_canvas_pixels_ignored() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(5, 5, Rgba::BLUE);
        fb.set_pixel(50, 5, Rgba::BLUE);
        fb.blend_pixel(5, 50, Rgba::BLUE);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(10, 0), None);
        assert_eq!(fb.painted_count(Rgba::TRANSPARENT), 1);
    }

    #[test]
    fn test_half_coverage_over_white() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.clear(Rgba::WHITE);
        fb.blend_pixel(1, 1, Rgba::BLACK.with_intensity(0.5));

        let px = fb.get_pixel(1, 1).unwrap();
        assert!((126..=128).contains(&px.r), "{px:?}");
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_blend_onto_transparent_keeps_color() {
        let mut fb = Framebuffer::new(2, 2).unwrap();
        fb.blend_pixel(0, 0, Rgba::new(200, 10, 10, 64));
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::new(200, 10, 10, 64)));
        fb.blend_pixel(1, 1, Rgba::TRANSPARENT);
        assert_eq!(fb.get_pixel(1, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_luminance_stats() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.clear(Rgba::BLACK);
        fb.set_pixel(3, 3, Rgba::WHITE);
        let (min, max, mean) = fb.luminance_stats();
        assert!(min.abs() < 1e-3);
        assert!((max - 255.0).abs() < 0.1);
        assert!((mean - 255.0 / 64.0).abs() < 0.1);
    }

    #[test]
    fn test_compact_pixels_drop_padding() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        fb.clear(Rgba::GREEN);
        let compact = fb.to_compact_pixels();
        assert_eq!(compact.len(), 3 * 2 * 4);
        assert!(compact.chunks_exact(4).all(|c| c == Rgba::GREEN.to_array()));
    }

    #[test]
    fn test_backend_selection() {
        let backend = Framebuffer::backend();
        println!("Selected backend: {backend:?}");
    }
}
