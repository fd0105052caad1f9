//! Decorative icons offered by the palette, drawn with imageproc primitives
//! on transparent 48x48 tiles.

use std::f32::consts::PI;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut, draw_line_segment_mut,
    draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;

pub const ICON_SIZE: u32 = 48;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IconKind {
    Star,
    Heart,
    Sun,
    Moon,
    Smiley,
    Flower,
}

impl IconKind {
    pub const ALL: [IconKind; 6] = [
        IconKind::Star,
        IconKind::Heart,
        IconKind::Sun,
        IconKind::Moon,
        IconKind::Smiley,
        IconKind::Flower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IconKind::Star => "Star",
            IconKind::Heart => "Heart",
            IconKind::Sun => "Sun",
            IconKind::Moon => "Moon",
            IconKind::Smiley => "Smiley",
            IconKind::Flower => "Flower",
        }
    }

    pub fn render(self) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(ICON_SIZE, ICON_SIZE, CLEAR);
        match self {
            IconKind::Star => star(&mut img),
            IconKind::Heart => heart(&mut img),
            IconKind::Sun => sun(&mut img),
            IconKind::Moon => moon(&mut img),
            IconKind::Smiley => smiley(&mut img),
            IconKind::Flower => flower(&mut img),
        }
        img
    }
}

/// One selectable palette entry.
#[derive(Debug, Clone)]
pub struct PaletteIcon {
    pub kind: IconKind,
    pub bitmap: Arc<RgbaImage>,
}

/// The fixed, read-only set of icons the user can stamp onto the picture.
#[derive(Debug, Clone)]
pub struct IconPalette {
    entries: Vec<PaletteIcon>,
}

impl IconPalette {
    pub fn new(entries: Vec<PaletteIcon>) -> Self {
        Self { entries }
    }

    pub fn bundled() -> Self {
        Self::new(
            IconKind::ALL
                .into_iter()
                .map(|kind| PaletteIcon {
                    kind,
                    bitmap: Arc::new(kind.render()),
                })
                .collect(),
        )
    }

    pub fn get(&self, kind: IconKind) -> Option<&PaletteIcon> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub fn entries(&self) -> &[PaletteIcon] {
        &self.entries
    }
}

/// Polygon around `(cx, cy)` alternating between two radii, first point up.
fn radial_polygon(cx: f32, cy: f32, outer: f32, inner: f32, points: usize) -> Vec<Point<i32>> {
    let mut poly: Vec<Point<i32>> = (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = -PI / 2.0 + i as f32 * PI / points as f32;
            Point::new((cx + r * angle.cos()).round() as i32, (cy + r * angle.sin()).round() as i32)
        })
        .collect();
    // draw_polygon_mut rejects repeated closing points.
    poly.dedup();
    if poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    poly
}

fn star(img: &mut RgbaImage) {
    let c = ICON_SIZE as f32 / 2.0;
    let poly = radial_polygon(c, c + 2.0, 22.0, 9.0, 5);
    draw_polygon_mut(img, &poly, Rgba([255, 200, 30, 255]));
}

fn heart(img: &mut RgbaImage) {
    let red = Rgba([220, 30, 60, 255]);
    draw_filled_circle_mut(img, (15, 17), 11, red);
    draw_filled_circle_mut(img, (33, 17), 11, red);
    let poly = [Point::new(5, 21), Point::new(43, 21), Point::new(24, 43)];
    draw_polygon_mut(img, &poly, red);
}

fn sun(img: &mut RgbaImage) {
    let c = ICON_SIZE as f32 / 2.0;
    let ray = Rgba([255, 170, 0, 255]);
    for i in 0..12 {
        let angle = i as f32 * PI / 6.0;
        for offset in [-1.0f32, 0.0, 1.0] {
            let (s, e) = (13.0, 22.0);
            let (dx, dy) = (-angle.sin() * offset, angle.cos() * offset);
            draw_line_segment_mut(
                img,
                (c + s * angle.cos() + dx, c + s * angle.sin() + dy),
                (c + e * angle.cos() + dx, c + e * angle.sin() + dy),
                ray,
            );
        }
    }
    draw_filled_circle_mut(img, (24, 24), 12, Rgba([255, 215, 40, 255]));
}

fn moon(img: &mut RgbaImage) {
    draw_filled_circle_mut(img, (24, 24), 19, Rgba([245, 235, 170, 255]));
    // Bite out a crescent.
    draw_filled_circle_mut(img, (33, 18), 17, CLEAR);
}

fn smiley(img: &mut RgbaImage) {
    let black = Rgba([20, 20, 20, 255]);
    draw_filled_circle_mut(img, (24, 24), 21, black);
    draw_filled_circle_mut(img, (24, 24), 19, Rgba([255, 220, 50, 255]));
    draw_filled_ellipse_mut(img, (17, 18), 3, 4, black);
    draw_filled_ellipse_mut(img, (31, 18), 3, 4, black);
    for i in 0..=16 {
        let angle = PI / 6.0 + i as f32 * (2.0 * PI / 3.0) / 16.0;
        let (x, y) = (24.0 + 12.0 * angle.cos(), 24.0 + 11.0 * angle.sin());
        draw_filled_circle_mut(img, (x.round() as i32, y.round() as i32), 1, black);
    }
}

fn flower(img: &mut RgbaImage) {
    draw_filled_rect_mut(img, Rect::at(23, 28).of_size(3, 20), Rgba([40, 140, 50, 255]));
    let petal = Rgba([230, 110, 200, 255]);
    for i in 0..6 {
        let angle = i as f32 * PI / 3.0;
        let center = (24.0 + 10.0 * angle.cos(), 20.0 + 10.0 * angle.sin());
        draw_filled_circle_mut(img, (center.0.round() as i32, center.1.round() as i32), 7, petal);
    }
    draw_filled_circle_mut(img, (24, 20), 6, Rgba([255, 210, 40, 255]));
}

/// Red/green/blue bands used as the "Color..." button icon.
pub fn color_swatch() -> RgbaImage {
    let mut img = RgbaImage::new(32, 32);
    draw_filled_rect_mut(&mut img, Rect::at(0, 0).of_size(32, 32), Rgba([255, 0, 0, 255]));
    draw_filled_rect_mut(&mut img, Rect::at(10, 0).of_size(22, 32), Rgba([0, 255, 0, 255]));
    draw_filled_rect_mut(&mut img, Rect::at(20, 0).of_size(12, 32), Rgba([0, 0, 255, 255]));
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_has_ink_and_transparent_corners() {
        for kind in IconKind::ALL {
            let img = kind.render();
            assert_eq!(img.dimensions(), (ICON_SIZE, ICON_SIZE));
            assert_eq!(img.get_pixel(0, 0)[3], 0, "{kind:?}");
            let opaque = img.pixels().filter(|p| p[3] == 255).count();
            assert!(opaque > 100, "{kind:?} only has {opaque} opaque pixels");
        }
    }

    #[test]
    fn moon_is_a_crescent() {
        let img = IconKind::Moon.render();
        assert_eq!(img.get_pixel(33, 18)[3], 0);
        assert_eq!(img.get_pixel(10, 30)[3], 255);
    }

    #[test]
    fn palette_lists_every_kind_once() {
        let palette = IconPalette::bundled();
        assert_eq!(palette.entries().len(), IconKind::ALL.len());
        for kind in IconKind::ALL {
            assert_eq!(palette.get(kind).map(|e| e.kind), Some(kind));
        }
    }

    #[test]
    fn swatch_has_three_bands() {
        let img = color_swatch();
        assert_eq!(*img.get_pixel(5, 5), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(15, 5), Rgba([0, 255, 0, 255]));
        assert_eq!(*img.get_pixel(25, 5), Rgba([0, 0, 255, 255]));
    }
}
