// src/main.rs

use sprite_compositor::{
    config::CONFIG, quad::SpriteQuad, Color4, PixelCompositor, Surface, Texture,
};

use anyhow::Context;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

const DEFAULT_OUTPUT_PATH: &str = "out.ppm";

// Checkerboard colors of the demo texture.
const CHECKER_LIGHT: Color4 = Color4::new(0.9, 0.9, 0.9, 1.0);
const CHECKER_DARK: Color4 = Color4::new(0.2, 0.2, 0.25, 0.5);

/// Main entry point: draws one tinted, textured sprite quad and writes it as a PPM.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting sprite-compositor...");

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

    // --- Configuration ---
    let config = &*CONFIG;
    debug!("Configuration: {:?}", config);

    // --- Texture (sampling collaborator) ---
    let texture = Texture::checkerboard(
        config.texture.size,
        config.texture.size,
        config.texture.cell,
        CHECKER_LIGHT,
        CHECKER_DARK,
    )
    .context("Failed to build checkerboard texture")?
    .with_wrap(config.texture.wrap);
    debug!(
        "Texture: {}x{}, {:?} wrapping",
        texture.width(),
        texture.height(),
        texture.wrap()
    );

    // --- Rasterization (interpolation collaborator) ---
    let (width, height) = (config.surface.width, config.surface.height);
    let quad = SpriteQuad::new(&config.tint, config.texture.repeat);
    let fragments = quad.rasterize(width, height);
    info!("Rasterized {} fragments for a {}x{} surface", fragments.len(), width, height);

    // --- Compositing ---
    let compositor = PixelCompositor::new();
    let started = Instant::now();
    let colors = if config.parallel {
        compositor.shade_par(&fragments, &texture)
    } else {
        compositor.shade_all(&fragments, &texture)
    };
    info!(
        "Shaded {} fragments in {:?} ({})",
        colors.len(),
        started.elapsed(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    // --- Output merging ---
    let mut surface = Surface::new(width, height, config.surface.clear);
    if width > 0 {
        for (y, row) in colors.chunks(width).enumerate() {
            surface.merge_row(0, y, row, config.blend);
        }
    }

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create output file {}", output_path))?;
    surface
        .write_ppm(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output_path))?;

    info!("Wrote {} ({:?} blending).", output_path, config.blend);
    Ok(())
}
