// src/lib.rs

//! Per-fragment color compositing for a 2D sprite renderer.
//!
//! The heart of the crate is [`compositor::compose`]:
//!
//! ```text
//! output = additive + diffuse ⊙ sample
//! ```
//!
//! applied identically to red, green, blue and alpha. Texture sampling is
//! injected through the [`sampler::Sampler`] trait, and clamping/blending
//! into a framebuffer lives in [`merger`], downstream of the compositor.

pub mod color;
pub mod compositor;
pub mod config;
pub mod merger;
pub mod quad;
pub mod sampler;

pub use color::{Color4, Rgba};
pub use compositor::{compose, Fragment, PixelCompositor};
pub use merger::{BlendMode, Surface};
pub use sampler::{Sampler, SolidColor, TexCoord, Texture, WrapMode};
