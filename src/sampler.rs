// src/sampler.rs

//! Texture sampling, injected into the compositor as a capability.
//!
//! The compositor only needs `sample(coord) -> Color4`; how a texel is found
//! (filtering, wrapping, where the pixels live) is entirely up to the
//! `Sampler` implementation. Any `Fn(TexCoord) -> Color4` closure is a
//! sampler, which keeps tests and GPU-less callers trivial.
//!
//! `Texture` is a reference implementation: an in-memory RGBA image with
//! nearest-neighbour filtering and a per-texture wrap mode.

use crate::color::{Color4, Rgba};
use anyhow::{ensure, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// A normalized 2D texture coordinate. `(0, 0)` is the top-left corner of
/// the texture and `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
}

impl TexCoord {
    pub const fn new(u: f32, v: f32) -> Self {
        Self { u, v }
    }
}

/// Looks up a color for a texture coordinate.
pub trait Sampler {
    fn sample(&self, coord: TexCoord) -> Color4;
}

impl<F> Sampler for F
where
    F: Fn(TexCoord) -> Color4,
{
    fn sample(&self, coord: TexCoord) -> Color4 {
        self(coord)
    }
}

/// A sampler that ignores the coordinate and returns one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor(pub Color4);

impl Sampler for SolidColor {
    fn sample(&self, _coord: TexCoord) -> Color4 {
        self.0
    }
}

/// How coordinates outside `[0, 1)` are mapped back onto the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Coordinates are clamped to the edge texels.
    #[default]
    Clamp,
    /// The texture tiles; only the fractional part of the coordinate is used.
    Repeat,
}

impl WrapMode {
    /// Maps a coordinate along one axis to a texel index in `0..len`.
    fn texel_index(self, coord: f32, len: usize) -> usize {
        if !coord.is_finite() {
            return 0;
        }
        let coord = match self {
            WrapMode::Clamp => coord,
            WrapMode::Repeat => coord - coord.floor(),
        };
        // Negative values saturate to 0 in the cast; the min handles 1.0 and above.
        ((coord * len as f32).floor() as usize).min(len - 1)
    }
}

/// An in-memory RGBA texture, row-major, sampled with nearest filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Color4>,
    wrap: WrapMode,
}

impl Texture {
    /// Creates a texture from `width * height` texels in row-major order.
    pub fn new(width: usize, height: usize, texels: Vec<Color4>) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "texture dimensions must be non-zero, got {}x{}",
            width,
            height
        );
        let count = width
            .checked_mul(height)
            .with_context(|| format!("texture {}x{} is too large", width, height))?;
        ensure!(
            texels.len() == count,
            "texture {}x{} needs {} texels, got {}",
            width,
            height,
            count,
            texels.len()
        );
        Ok(Self {
            width,
            height,
            texels,
            wrap: WrapMode::default(),
        })
    }

    /// Creates a texture from tightly packed 8-bit RGBA bytes.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .with_context(|| format!("texture {}x{} is too large", width, height))?;
        ensure!(
            bytes.len() == len,
            "texture {}x{} needs {} bytes of RGBA8, got {}",
            width,
            height,
            len,
            bytes.len()
        );
        let texels = bytes
            .chunks_exact(4)
            .map(|px| Color4::from(Rgba::new(px[0], px[1], px[2], px[3])))
            .collect();
        Self::new(width, height, texels)
    }

    /// Builds a checkerboard of `cell`-sized squares alternating between
    /// `a` (top-left) and `b`.
    pub fn checkerboard(
        width: usize,
        height: usize,
        cell: usize,
        a: Color4,
        b: Color4,
    ) -> Result<Self> {
        let cell = cell.max(1);
        debug!(
            "Texture: building {}x{} checkerboard with {}px cells",
            width, height, cell
        );
        let texels = (0..height)
            .flat_map(move |y| {
                (0..width).map(move |x| if (x / cell + y / cell) % 2 == 0 { a } else { b })
            })
            .collect();
        Self::new(width, height, texels)
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Returns the texel at integer coordinates, if in bounds.
    pub fn texel(&self, x: usize, y: usize) -> Option<Color4> {
        if x < self.width && y < self.height {
            self.texels.get(y * self.width + x).copied()
        } else {
            None
        }
    }
}

impl Sampler for Texture {
    fn sample(&self, coord: TexCoord) -> Color4 {
        let x = self.wrap.texel_index(coord.u, self.width);
        let y = self.wrap.texel_index(coord.v, self.height);
        // Indices are always in range: texel_index caps at len - 1 and
        // construction guarantees texels.len() == width * height.
        self.texels[y * self.width + x]
    }
}
