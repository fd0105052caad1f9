use std::sync::Arc;

use image::{RgbaImage, imageops};

/// A bitmap drawn with its center at a point on the canvas.
///
/// The pixels are shared and never change; only the center moves.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    bitmap: Arc<RgbaImage>,
    center_x: i32,
    center_y: i32,
}

impl ImageItem {
    pub fn new(bitmap: Arc<RgbaImage>, center_x: i32, center_y: i32) -> Self {
        Self {
            bitmap,
            center_x,
            center_y,
        }
    }

    pub fn bitmap(&self) -> &Arc<RgbaImage> {
        &self.bitmap
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn set_center(&mut self, x: i32, y: i32) {
        self.center_x = x;
        self.center_y = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.center_x = self.center_x.saturating_add(dx);
        self.center_y = self.center_y.saturating_add(dy);
    }

    fn half_extent(&self) -> (i32, i32) {
        let (w, h) = self.bitmap.dimensions();
        ((w / 2) as i32, (h / 2) as i32)
    }

    /// Alpha-composites the bitmap onto `canvas`; parts off the canvas are clipped.
    pub fn draw(&self, canvas: &mut RgbaImage) {
        let (hw, hh) = self.half_extent();
        let left = i64::from(self.center_x) - i64::from(hw);
        let top = i64::from(self.center_y) - i64::from(hh);
        imageops::overlay(canvas, self.bitmap.as_ref(), left, top);
    }

    /// True when `(x, y)` lies strictly inside the bitmap's box; edges don't count.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (hw, hh) = self.half_extent();
        x > self.center_x - hw && x < self.center_x + hw && y > self.center_y - hh && y < self.center_y + hh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn square(size: u32, color: Rgba<u8>) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(size, size, color))
    }

    #[test]
    fn containment_excludes_the_border() {
        let item = ImageItem::new(square(32, Rgba([0, 0, 0, 255])), 100, 100);
        assert!(item.contains(100, 100));
        assert!(!item.contains(84, 100));
        assert!(item.contains(85, 100));
        assert!(!item.contains(116, 100));
        assert!(item.contains(115, 115));
        assert!(!item.contains(100, 84));
        assert!(!item.contains(100, 116));
    }

    #[test]
    fn moving_shifts_the_hit_box() {
        let mut item = ImageItem::new(square(32, Rgba([0, 0, 0, 255])), 100, 100);
        item.move_by(50, -20);
        assert_eq!(item.center(), (150, 80));
        assert!(!item.contains(100, 100));
        assert!(item.contains(150, 80));
    }

    #[test]
    fn draw_places_bitmap_around_center_and_clips() {
        let red = Rgba([255, 0, 0, 255]);
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        ImageItem::new(square(4, red), 10, 10).draw(&mut canvas);
        assert_eq!(*canvas.get_pixel(8, 8), red);
        assert_eq!(*canvas.get_pixel(11, 11), red);
        assert_eq!(*canvas.get_pixel(12, 12), Rgba([255, 255, 255, 255]));

        // Hanging off the top-left corner must not panic.
        ImageItem::new(square(4, red), 0, 0).draw(&mut canvas);
        assert_eq!(*canvas.get_pixel(0, 0), red);
    }

    #[test]
    fn transparent_pixels_keep_the_canvas() {
        let mut canvas = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
        ImageItem::new(square(4, Rgba([255, 0, 0, 0])), 4, 4).draw(&mut canvas);
        assert_eq!(*canvas.get_pixel(4, 4), Rgba([0, 0, 255, 255]));
    }
}
