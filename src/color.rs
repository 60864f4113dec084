// src/color.rs

//! Defines the color types shared by every stage of the sprite pipeline.
//!
//! `Color4` is the working format: four `f32` channels with no implied range.
//! Tints, texture samples and compositor output are all `Color4`, and none of
//! the arithmetic on it clamps. `Rgba` is the 8-bit storage format used by
//! textures on disk and by the framebuffer; converting into it is the only
//! place where channels are saturated.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A linear four-channel color (red, green, blue, alpha).
///
/// Channels are conventionally in `[0, 1]` but any real value is allowed.
/// Serialized as a `[r, g, b, a]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    /// All channels zero, alpha included.
    pub const ZERO: Color4 = Color4::new(0.0, 0.0, 0.0, 0.0);
    /// All channels one, alpha included. The neutral diffuse tint.
    pub const WHITE: Color4 = Color4::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same value in every channel.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Combines two colors channel by channel.
    pub fn zip_with(self, other: Color4, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }

    /// `self * factor + addend`, per channel.
    ///
    /// Evaluated as a rounded multiply followed by a rounded add, never as a
    /// fused multiply-add, so results match `addend + self * factor` written
    /// out with the operators.
    pub fn mul_add(self, factor: Color4, addend: Color4) -> Self {
        Self::new(
            addend.r + self.r * factor.r,
            addend.g + self.g * factor.g,
            addend.b + self.b * factor.b,
            addend.a + self.a * factor.a,
        )
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(self, other: Color4, t: f32) -> Self {
        self.zip_with(other, |a, b| a + (b - a) * t)
    }

    /// Quantizes to 8 bits per channel.
    ///
    /// Channels are saturated to `[0, 1]` and rounded to the nearest step.
    /// NaN becomes 0 (`as` casts saturate NaN to zero).
    pub fn to_rgba(self) -> Rgba {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::new(q(self.r), q(self.g), q(self.b), q(self.a))
    }
}

impl From<[f32; 4]> for Color4 {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Color4::new(r, g, b, a)
    }
}

impl From<Color4> for [f32; 4] {
    fn from(color: Color4) -> Self {
        color.to_array()
    }
}

impl From<Rgba> for Color4 {
    /// Normalizes each 8-bit channel to `c / 255`.
    fn from(rgba: Rgba) -> Self {
        let n = |c: u8| c as f32 / 255.0;
        Color4::new(n(rgba.r), n(rgba.g), n(rgba.b), n(rgba.a))
    }
}

impl Add for Color4 {
    type Output = Color4;

    fn add(self, rhs: Color4) -> Color4 {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for Color4 {
    type Output = Color4;

    fn sub(self, rhs: Color4) -> Color4 {
        self.zip_with(rhs, |a, b| a - b)
    }
}

/// Component-wise (Hadamard) product. Alpha is multiplied like any other channel.
impl Mul for Color4 {
    type Output = Color4;

    fn mul(self, rhs: Color4) -> Color4 {
        self.zip_with(rhs, |a, b| a * b)
    }
}

/// RGBA color in 32-bit format (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to RGBA byte array
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Rgba::new(r, g, b, a)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(rgba: Rgba) -> Self {
        rgba.to_bytes()
    }
}
