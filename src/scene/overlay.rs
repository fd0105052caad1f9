use image::{Rgb, Rgba, RgbaImage, imageops};

/// Opacity reached at the bottom edge of the overlay.
pub const OVERLAY_MAX_ALPHA: u8 = 224;

/// Blends a vertical wash of `color` over the canvas: fully transparent at
/// the top row, [`OVERLAY_MAX_ALPHA`] at the bottom, linear in between.
pub fn apply_gradient_overlay(canvas: &mut RgbaImage, color: Rgb<u8>) {
    let (w, h) = canvas.dimensions();
    // A single row is the top row, where the wash is fully transparent.
    if w == 0 || h < 2 {
        return;
    }

    let mut layer = RgbaImage::new(w, h);
    let [r, g, b] = color.0;
    imageops::vertical_gradient(&mut layer, &Rgba([r, g, b, 0]), &Rgba([r, g, b, OVERLAY_MAX_ALPHA]));
    imageops::overlay(canvas, &layer, 0, 0);
}
