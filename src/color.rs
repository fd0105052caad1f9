//! Color helpers shared by the scene and the command surface.

use image::{Rgb, Rgba};
use palette::Srgb;

use crate::error::SceneError;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Parses `#rrggbb`, `rrggbb` or `#rgb` into an opaque color.
pub fn parse_hex_color(input: &str) -> Result<Rgb<u8>, SceneError> {
    let trimmed = input.trim();
    let parsed: Srgb<u8> = trimmed
        .parse()
        .map_err(|_| SceneError::invalid("color", trimmed))?;
    Ok(Rgb([parsed.red, parsed.green, parsed.blue]))
}

/// Formats a color as `#rrggbb`, the inverse of [`parse_hex_color`].
pub fn to_hex(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[inline]
pub fn opaque(color: Rgb<u8>) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// Source-over blend of `color` with `coverage` in `[0, 1]` onto an opaque pixel.
#[inline]
pub fn blend_coverage(dst: &mut Rgba<u8>, color: Rgb<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    for c in 0..3 {
        let d = dst[c] as f32;
        let s = color[c] as f32;
        dst[c] = (s * a + d * (1.0 - a)).round() as u8;
    }
    dst[3] = 255;
}
