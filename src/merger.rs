// src/merger.rs

//! Output merging: writing compositor output into an 8-bit surface.
//!
//! The compositor hands over unclamped `Color4` values. This module owns
//! everything that happens after that: blending against the existing
//! destination pixel, saturating to `[0, 1]` and quantizing to `Rgba`.

use crate::color::{Color4, Rgba};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How a source color is combined with the destination pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// The source overwrites the destination.
    Replace,
    /// Standard "over" blending weighted by source alpha.
    #[default]
    Alpha,
    /// Source and destination are summed (glows, lights).
    Additive,
}

impl BlendMode {
    /// Blends `src` over `dst` and quantizes the result.
    pub fn blend(self, src: Color4, dst: Rgba) -> Rgba {
        let dst = Color4::from(dst);
        let out = match self {
            BlendMode::Replace => src,
            BlendMode::Alpha => {
                let sa = src.a.clamp(0.0, 1.0);
                let inv = 1.0 - sa;
                Color4::new(
                    src.r * sa + dst.r * inv,
                    src.g * sa + dst.g * inv,
                    src.b * sa + dst.b * inv,
                    sa + dst.a * inv,
                )
            }
            BlendMode::Additive => src + dst,
        };
        out.to_rgba()
    }
}

/// An 8-bit RGBA render target, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Creates a surface filled with `clear`.
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize` or the allocation fails.
    pub fn new(width: usize, height: usize, clear: Rgba) -> Self {
        debug!("Surface: creating {}x{} target", width, height);
        Self {
            width,
            height,
            pixels: vec![clear; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Returns the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Blends `src` into the pixel at `(x, y)`.
    ///
    /// Returns `false` and leaves the surface untouched when the coordinate
    /// is outside the surface.
    pub fn merge(&mut self, x: usize, y: usize, src: Color4, mode: BlendMode) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = mode.blend(src, self.pixels[i]);
                true
            }
            None => false,
        }
    }

    /// Blends a run of colors starting at `(x, y)` and moving right.
    ///
    /// Colors falling past the right edge are dropped. Returns how many
    /// pixels were written.
    pub fn merge_row(&mut self, x: usize, y: usize, src: &[Color4], mode: BlendMode) -> usize {
        if y >= self.height || x >= self.width {
            return 0;
        }
        let start = y * self.width + x;
        let len = src.len().min(self.width - x);
        if len < src.len() {
            warn!(
                "Surface: row at ({}, {}) clipped from {} to {} pixels",
                x,
                y,
                src.len(),
                len
            );
        }
        for (dst, &color) in self.pixels[start..start + len].iter_mut().zip(src) {
            *dst = mode.blend(color, *dst);
        }
        len
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Writes the surface as a binary PPM (`P6`). Alpha is dropped.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)
            .context("Failed to write PPM header")?;
        let rgb: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b])
            .collect();
        writer
            .write_all(&rgb)
            .context("Failed to write PPM pixel data")?;
        writer.flush().context("Failed to flush PPM output")?;
        Ok(())
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}
