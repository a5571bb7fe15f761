//! Seed (flood) fills.
//!
//! A pixel is interior when it lies on the canvas and the scanline sweep
//! would paint it ([`scanline_covers`]), so a flood and a sweep of the same
//! polygon agree pixel for pixel. The seed must also pass the ray-casting
//! [`point_in_polygon`] test. Each fill owns its visited set for the
//! lifetime of the iterator.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Pixel, Point, Span};
use crate::hull::point_in_polygon;
use crate::render::fill::scanline_covers;

#[derive(Debug, Clone, Copy)]
struct Region<'a> {
    vertices: &'a [Point],
    bounds: Bounds,
}

impl Region<'_> {
    fn contains(&self, p: Pixel) -> bool {
        self.bounds.contains(p) && scanline_covers(self.vertices, p)
    }

    fn check_seed(&self, seed: Pixel) -> Result<()> {
        if self.contains(seed) && point_in_polygon(Point::from(seed), self.vertices) {
            Ok(())
        } else {
            log::debug!("seed ({}, {}) rejected", seed.x, seed.y);
            Err(Error::SeedOutsidePolygon {
                x: seed.x,
                y: seed.y,
            })
        }
    }
}

/// Stack-based 4-connected flood fill yielding one pixel per step.
#[derive(Debug, Clone)]
pub struct PixelSeedFill<'a> {
    region: Region<'a>,
    stack: Vec<Pixel>,
    visited: HashSet<Pixel>,
}

impl<'a> PixelSeedFill<'a> {
    /// Start a flood at `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedOutsidePolygon`] if the seed is not interior.
    pub fn new(vertices: &'a [Point], seed: Pixel, bounds: Bounds) -> Result<Self> {
        let region = Region { vertices, bounds };
        region.check_seed(seed)?;
        Ok(Self {
            region,
            stack: vec![seed],
            visited: HashSet::new(),
        })
    }
}

impl Iterator for PixelSeedFill<'_> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        while let Some(p) = self.stack.pop() {
            if !self.visited.insert(p) {
                continue;
            }
            if !self.region.contains(p) {
                continue;
            }

            self.stack.push(p.offset(1, 0));
            self.stack.push(p.offset(-1, 0));
            self.stack.push(p.offset(0, 1));
            self.stack.push(p.offset(0, -1));
            log::trace!("seed fill pixel ({}, {})", p.x, p.y);
            return Some(p);
        }
        None
    }
}

/// Span-based flood fill.
///
/// Each step expands the popped seed left and right into a maximal run of
/// unvisited interior pixels, then pushes one seed for every such run
/// touching the span on the rows above and below. The stack holds at most
/// one entry per row run instead of one per pixel.
#[derive(Debug, Clone)]
pub struct ScanlineSeedFill<'a> {
    region: Region<'a>,
    stack: Vec<Pixel>,
    visited: HashSet<Pixel>,
}

impl<'a> ScanlineSeedFill<'a> {
    /// Start a span flood at `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedOutsidePolygon`] if the seed is not interior.
    pub fn new(vertices: &'a [Point], seed: Pixel, bounds: Bounds) -> Result<Self> {
        let region = Region { vertices, bounds };
        region.check_seed(seed)?;
        Ok(Self {
            region,
            stack: vec![seed],
            visited: HashSet::new(),
        })
    }

    fn open(&self, p: Pixel) -> bool {
        !self.visited.contains(&p) && self.region.contains(p)
    }

    fn seed_row(&mut self, y: i32, left: i32, right: i32) {
        let mut in_run = false;
        for x in left..=right {
            let p = Pixel::new(x, y);
            if self.open(p) {
                if !in_run {
                    self.stack.push(p);
                    in_run = true;
                }
            } else {
                in_run = false;
            }
        }
    }
}

impl Iterator for ScanlineSeedFill<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while let Some(p) = self.stack.pop() {
            if !self.open(p) {
                continue;
            }

            let mut left = p.x;
            while self.open(Pixel::new(left - 1, p.y)) {
                left -= 1;
            }
            let mut right = p.x;
            while self.open(Pixel::new(right + 1, p.y)) {
                right += 1;
            }

            let span = Span::new(p.y, left, right);
            self.visited.extend(span.pixels());
            log::trace!("seed fill span y={} x={left}..={right}", p.y);

            self.seed_row(p.y - 1, left, right);
            self.seed_row(p.y + 1, left, right);
            return Some(span);
        }
        None
    }
}
