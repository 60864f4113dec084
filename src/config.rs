// src/config.rs

//! Defines the configuration structures for the `sprite-compositor` demo.
//!
//! The compositing stage itself takes no configuration. These settings only
//! describe the scene the demo binary draws: the target surface, the tints
//! at the corners of the sprite quad, the procedural texture and the blend
//! mode used when merging into the surface.
//!
//! Configuration is read from a JSON file. Every struct uses
//! `#[serde(default)]`, so a file only needs the fields it overrides.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::Path;

use anyhow::Context;
use log::{info, warn};
use once_cell::sync::Lazy;

use crate::color::{Color4, Rgba};
use crate::merger::BlendMode;
use crate::sampler::WrapMode;

/// Environment variable holding the path of the JSON config file.
pub const CONFIG_ENV_VAR: &str = "SPRITE_COMPOSITOR_CONFIG";

/// Process-wide configuration, loaded on first access.
///
/// Falls back to `Config::default()` when `SPRITE_COMPOSITOR_CONFIG` is unset
/// or the file cannot be loaded.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env_or_default);

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration of the demo renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Render target settings.
    pub surface: SurfaceConfig,
    /// Per-corner tints of the sprite quad.
    pub tint: TintConfig,
    /// Procedural texture settings.
    pub texture: TextureConfig,
    /// How shaded fragments are merged into the surface.
    pub blend: BlendMode,
    /// Shade fragments on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            surface: SurfaceConfig::default(),
            tint: TintConfig::default(),
            texture: TextureConfig::default(),
            blend: BlendMode::default(),
            parallel: true,
        }
    }
}

impl Config {
    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by `SPRITE_COMPOSITOR_CONFIG`, or defaults.
    pub fn from_env_or_default() -> Self {
        Self::load_or_default(std::env::var_os(CONFIG_ENV_VAR).as_deref())
    }

    /// Loads `path` if given, falling back to defaults with a warning when
    /// the file is missing or invalid.
    pub fn load_or_default(path: Option<&OsStr>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                warn!("{:#}. Using default configuration.", e);
                Self::default()
            }),
            None => {
                info!("{} not set, using default configuration.", CONFIG_ENV_VAR);
                Self::default()
            }
        }
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

// --- Surface Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    /// Color the surface is cleared to before drawing.
    pub clear: Rgba,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: 256,
            height: 256,
            clear: Rgba::opaque(32, 32, 32),
        }
    }
}

// --- Tint Configuration ---

/// The two tints carried by one quad corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CornerTint {
    /// Multiplies the texture sample.
    pub diffuse: Color4,
    /// Added after modulation.
    pub additive: Color4,
}

impl Default for CornerTint {
    fn default() -> Self {
        CornerTint {
            diffuse: Color4::WHITE,
            additive: Color4::ZERO,
        }
    }
}

/// Tints at the quad corners, in the order top-left, top-right,
/// bottom-right, bottom-left. Interior fragments interpolate bilinearly.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TintConfig {
    pub corners: [CornerTint; 4],
}

// --- Texture Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Width and height of the square checkerboard texture, in texels.
    pub size: usize,
    /// Size of one checker cell, in texels.
    pub cell: usize,
    pub wrap: WrapMode,
    /// How many times the texture spans the quad along each axis.
    pub repeat: f32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig {
            size: 64,
            cell: 8,
            wrap: WrapMode::Repeat,
            repeat: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.surface.width, 256);
        assert_eq!(config.surface.clear, Rgba::opaque(32, 32, 32));
        assert_eq!(config.blend, BlendMode::Alpha);
        assert!(config.parallel);
        assert_eq!(config.texture.wrap, WrapMode::Repeat);
        for corner in config.tint.corners {
            assert_eq!(corner.diffuse, Color4::WHITE);
            assert_eq!(corner.additive, Color4::ZERO);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(
            r#"{
                "surface": { "width": 32 },
                "blend": "additive",
                "tint": { "corners": [
                    { "additive": [0.1, 0.0, 0.0, 0.0] },
                    {},
                    { "diffuse": [0.5, 0.5, 0.5, 1.0] },
                    {}
                ] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.surface.width, 32);
        assert_eq!(config.surface.height, 256);
        assert_eq!(config.blend, BlendMode::Additive);
        assert_eq!(config.tint.corners[0].diffuse, Color4::WHITE);
        assert_eq!(config.tint.corners[0].additive, Color4::new(0.1, 0.0, 0.0, 0.0));
        assert_eq!(config.tint.corners[2].diffuse, Color4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(config.texture, TextureConfig::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Config::from_json("{ \"blend\": \"multiply\" }").is_err());
        assert!(Config::from_json("not json").is_err());
    }

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "sprite-compositor-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(Config::load_or_default(None), Config::default());

        let missing = OsStr::new("/nonexistent/sprite-compositor.json");
        assert_eq!(Config::load_or_default(Some(missing)), Config::default());

        let bad = write_temp_config("bad", "{ \"blend\": 3 }");
        assert_eq!(Config::load_or_default(Some(bad.as_os_str())), Config::default());
        std::fs::remove_file(bad).unwrap();
    }

    #[test]
    fn test_load_or_default_reads_file() {
        let good = write_temp_config("good", r#"{ "parallel": false, "blend": "replace" }"#);
        let config = Config::load_or_default(Some(good.as_os_str()));
        std::fs::remove_file(good).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.blend, BlendMode::Replace);
        assert_eq!(config.surface, SurfaceConfig::default());
    }

    #[test]
    fn test_from_env_or_default_uses_env_var() {
        // Only this test touches the variable.
        let path = write_temp_config("env", r#"{ "surface": { "width": 7 } }"#);
        std::env::set_var(CONFIG_ENV_VAR, &path);
        let config = Config::from_env_or_default();
        std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/sprite-compositor.json");
        let fallback = Config::from_env_or_default();
        std::env::remove_var(CONFIG_ENV_VAR);
        std::fs::remove_file(path).unwrap();

        assert_eq!(config.surface.width, 7);
        assert_eq!(fallback, Config::default());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Config::load("/nonexistent/sprite-compositor.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
