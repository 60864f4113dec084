// src/quad.rs

//! A stand-in for the upstream rasterizer: covers a rectangular surface
//! with one sprite quad and produces the interpolated `Fragment` for every
//! pixel.
//!
//! Tints are interpolated bilinearly between the four corners and texture
//! coordinates run from `(0, 0)` at the top-left to `(repeat, repeat)` at
//! the bottom-right, sampled at pixel centers.

use crate::color::Color4;
use crate::compositor::Fragment;
use crate::config::{CornerTint, TintConfig};
use crate::sampler::TexCoord;

/// A screen-covering quad with per-corner tints.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteQuad {
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corners: [CornerTint; 4],
    /// Texture repetitions across the quad.
    pub repeat: f32,
}

impl SpriteQuad {
    pub fn new(tint: &TintConfig, repeat: f32) -> Self {
        Self {
            corners: tint.corners,
            repeat,
        }
    }

    /// Interpolates the quad's attributes at normalized position `(s, t)`.
    pub fn fragment_at(&self, s: f32, t: f32) -> Fragment {
        let [tl, tr, br, bl] = self.corners;
        let bilerp = |f: fn(&CornerTint) -> Color4| -> Color4 {
            let top = f(&tl).lerp(f(&tr), s);
            let bottom = f(&bl).lerp(f(&br), s);
            top.lerp(bottom, t)
        };
        Fragment::new(
            bilerp(|c| c.diffuse),
            bilerp(|c| c.additive),
            TexCoord::new(s * self.repeat, t * self.repeat),
        )
    }

    /// One fragment per pixel of a `width x height` target, row-major.
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize` or the allocation fails.
    pub fn rasterize(&self, width: usize, height: usize) -> Vec<Fragment> {
        let mut fragments = Vec::with_capacity(width * height);
        for y in 0..height {
            let t = (y as f32 + 0.5) / height as f32;
            for x in 0..width {
                let s = (x as f32 + 0.5) / width as f32;
                fragments.push(self.fragment_at(s, t));
            }
        }
        fragments
    }
}
