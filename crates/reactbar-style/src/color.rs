#![forbid(unsafe_code)]

//! Packed ARGB color.

use std::fmt;

/// A color packed as `0xAARRGGBB`.
///
/// This is the format theme tokens arrive in, so it is kept as-is instead of
/// being converted to floating-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Color(u32);

impl Color {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Create from a packed `0xAARRGGBB` value.
    #[inline]
    pub const fn argb(value: u32) -> Self {
        Self(value)
    }

    /// Create an opaque color from channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create a color from channels including alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// The packed `0xAARRGGBB` value.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Replace the alpha channel.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Multiply the alpha channel by `factor` (clamped to 0..=1).
    #[must_use]
    pub fn with_alpha_factor(self, factor: f32) -> Self {
        let alpha = (self.a() as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        self.with_alpha(alpha)
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Source-over composite of `self` on top of an opaque `background`.
    #[must_use]
    pub fn over(self, background: Color) -> Color {
        let alpha = self.a() as u32;
        let inv = 255 - alpha;
        let mix = |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * inv + 127) / 255) as u8;
        Color::rgb(
            mix(self.r(), background.r()),
            mix(self.g(), background.g()),
            mix(self.b(), background.b()),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self::argb(value)
    }
}
