//! End-to-end tests: rasterize a quad, shade it through a texture and merge
//! the result into a surface, checking the bytes that come out.

use sprite_compositor::config::{CornerTint, TintConfig};
use sprite_compositor::quad::SpriteQuad;
use sprite_compositor::{BlendMode, Color4, PixelCompositor, Rgba, Surface, Texture, WrapMode};
use test_log::test;

fn uniform_tint(diffuse: Color4, additive: Color4) -> TintConfig {
    TintConfig {
        corners: [CornerTint { diffuse, additive }; 4],
    }
}

fn render(tint: &TintConfig, texture: &Texture, blend: BlendMode, clear: Rgba) -> Surface {
    let (width, height) = (4, 2);
    let fragments = SpriteQuad::new(tint, 1.0).rasterize(width, height);
    let colors = PixelCompositor::new().shade_par(&fragments, texture);
    let mut surface = Surface::new(width, height, clear);
    for (y, row) in colors.chunks(width).enumerate() {
        assert_eq!(surface.merge_row(0, y, row, blend), width);
    }
    surface
}

#[test]
fn test_tinted_white_texture() {
    let texture = Texture::from_rgba8(1, 1, &[255, 255, 255, 255]).unwrap();
    let tint = uniform_tint(
        Color4::new(0.5, 0.5, 0.5, 1.0),
        Color4::new(0.1, 0.0, 0.0, 0.0),
    );
    let surface = render(&tint, &texture, BlendMode::Replace, Rgba::TRANSPARENT);
    for y in 0..2 {
        for x in 0..4 {
            assert_eq!(surface.pixel(x, y), Some(Rgba::new(153, 128, 128, 255)));
        }
    }
}

#[test]
fn test_zero_diffuse_shows_only_additive_tint() {
    let texture = Texture::checkerboard(2, 2, 1, Color4::WHITE, Color4::ZERO)
        .unwrap()
        .with_wrap(WrapMode::Repeat);
    let tint = uniform_tint(Color4::ZERO, Color4::new(0.0, 0.0, 1.0, 1.0));
    let surface = render(&tint, &texture, BlendMode::Alpha, Rgba::opaque(255, 0, 0));
    assert!(surface
        .as_bytes()
        .chunks_exact(4)
        .all(|px| px == &[0, 0, 255, 255]));
}

#[test]
fn test_checkerboard_shows_through_neutral_tint() {
    let texture = Texture::checkerboard(2, 1, 1, Color4::WHITE, Color4::ZERO).unwrap();
    let tint = uniform_tint(Color4::WHITE, Color4::ZERO);
    let surface = render(&tint, &texture, BlendMode::Replace, Rgba::opaque(9, 9, 9));
    // Texture spans the 4-pixel row once: two white texels then two clear ones.
    assert_eq!(surface.pixel(0, 0), Some(Rgba::new(255, 255, 255, 255)));
    assert_eq!(surface.pixel(1, 1), Some(Rgba::new(255, 255, 255, 255)));
    assert_eq!(surface.pixel(2, 0), Some(Rgba::TRANSPARENT));
    assert_eq!(surface.pixel(3, 1), Some(Rgba::TRANSPARENT));
}
