// src/compositor.rs

//! The per-fragment color compositing stage.
//!
//! For every covered pixel the upstream rasterizer hands over a `Fragment`:
//! an interpolated diffuse tint, an interpolated additive tint and a texture
//! coordinate. The compositor samples the texture through an injected
//! `Sampler` and produces
//!
//! ```text
//! output = additive + diffuse ⊙ sample
//! ```
//!
//! where `⊙` is the per-channel product. All four channels, alpha included,
//! go through the same formula. Nothing is clamped, premultiplied or
//! gamma-corrected here; bringing the result into a displayable range is the
//! job of the output merger (see `crate::merger`).
//!
//! Every evaluation is pure and independent of every other one, so a batch of
//! fragments can be shaded in any order or in parallel with identical results.

use crate::color::Color4;
use crate::sampler::{Sampler, TexCoord};
use log::trace;
use rayon::prelude::*;

/// Composites one fragment's inputs into its output color.
///
/// `output.c = additive.c + diffuse.c * sample.c` for each of r, g, b and a.
/// Out-of-range and negative inputs pass through the arithmetic unchanged.
#[inline]
pub fn compose(diffuse: Color4, additive: Color4, sample: Color4) -> Color4 {
    diffuse.mul_add(sample, additive)
}

/// The interpolated per-fragment inputs of the compositing stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Multiplicative tint applied to the texture sample.
    pub diffuse: Color4,
    /// Tint added after modulation.
    pub additive: Color4,
    pub texcoord: TexCoord,
}

impl Fragment {
    pub const fn new(diffuse: Color4, additive: Color4, texcoord: TexCoord) -> Self {
        Self {
            diffuse,
            additive,
            texcoord,
        }
    }

    /// A fragment that reproduces the texture sample unchanged.
    pub const fn untinted(texcoord: TexCoord) -> Self {
        Self::new(Color4::WHITE, Color4::ZERO, texcoord)
    }
}

/// Evaluates `compose` for fragments, sampling through a `Sampler`.
///
/// The compositor carries no state; it exists so callers have one value to
/// pass around for "the fragment stage".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelCompositor;

impl PixelCompositor {
    pub const fn new() -> Self {
        PixelCompositor
    }

    /// Samples `sampler` at the fragment's texcoord and composites.
    #[inline]
    pub fn shade<S>(&self, fragment: &Fragment, sampler: &S) -> Color4
    where
        S: Sampler + ?Sized,
    {
        let sample = sampler.sample(fragment.texcoord);
        compose(fragment.diffuse, fragment.additive, sample)
    }

    /// Shades every fragment on the current thread, in input order.
    pub fn shade_all<S>(&self, fragments: &[Fragment], sampler: &S) -> Vec<Color4>
    where
        S: Sampler + ?Sized,
    {
        trace!("PixelCompositor: shading {} fragments", fragments.len());
        fragments
            .iter()
            .map(|fragment| self.shade(fragment, sampler))
            .collect()
    }

    /// Shades every fragment on the rayon thread pool.
    ///
    /// Produces exactly the same colors, in the same order, as `shade_all`.
    pub fn shade_par<S>(&self, fragments: &[Fragment], sampler: &S) -> Vec<Color4>
    where
        S: Sampler + Sync + ?Sized,
    {
        trace!(
            "PixelCompositor: shading {} fragments in parallel",
            fragments.len()
        );
        fragments
            .par_iter()
            .map(|fragment| self.shade(fragment, sampler))
            .collect()
    }
}
