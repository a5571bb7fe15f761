//! Paint colors.
//!
//! Rasterizers never see a color; sinks pick one when they plot. Wu
//! coverage is carried into the alpha channel by [`Rgba::with_intensity`].

use std::str::FromStr;

use crate::error::Error;

/// 8-bit RGBA, laid out as the framebuffer stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// `#00000000`, the fresh framebuffer contents.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// `#000000`
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// `#ffffff`
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// `#ff0000`
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// `#00ff00`
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// `#0000ff`
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Color from all four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Same color, replacing alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha scaled by a coverage in `[0, 1]`.
    ///
    /// Coverage outside the range is clamped.
    #[must_use]
    pub fn with_intensity(self, intensity: f64) -> Self {
        let coverage = intensity.clamp(0.0, 1.0);
        self.with_alpha((f64::from(self.a) * coverage).round() as u8)
    }

    /// Channels in framebuffer byte order.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Inverse of [`Rgba::to_array`].
    #[must_use]
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// `#rrggbb` or `#rrggbbaa`; the leading `#` may be omitted.
impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let invalid = || Error::UnknownVariant {
            kind: "color",
            name: s.to_string(),
        };
        if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
            return Err(invalid());
        }

        let mut channels = [u8::MAX; 4];
        for (slot, pair) in channels.iter_mut().zip(digits.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
            *slot = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(Self::from_array(channels))
    }
}
