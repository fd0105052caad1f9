use std::sync::Arc;

use image::{Rgb, RgbaImage, imageops};

use super::image_item::ImageItem;
use super::overlay::apply_gradient_overlay;
use crate::color::{WHITE, opaque};
use crate::text::{FontBook, TextItem};

/// Overlay color used at startup and restored by [`SceneSurface::clear`].
pub const DEFAULT_OVERLAY: Rgb<u8> = WHITE;

/// Stable handle to an icon on the surface.
///
/// Ids are never reused, so a handle captured when a drag starts cannot end
/// up pointing at a different icon.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct IconId(u64);

#[derive(Debug, Clone)]
struct PlacedIcon {
    id: IconId,
    item: ImageItem,
}

/// The picture being composed.
///
/// Paint order is fixed: background color, background image, gradient
/// overlay, caption, then icons in insertion order. The last icon added is
/// painted on top and wins hit-tests.
#[derive(Debug, Clone)]
pub struct SceneSurface {
    background_color: Rgb<u8>,
    background_image: Option<Arc<RgbaImage>>,
    gradient_overlay_color: Option<Rgb<u8>>,
    text_item: TextItem,
    icons: Vec<PlacedIcon>,
    next_icon_id: u64,
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self {
            background_color: WHITE,
            background_image: None,
            gradient_overlay_color: Some(DEFAULT_OVERLAY),
            text_item: TextItem::default(),
            icons: Vec::new(),
            next_icon_id: 0,
        }
    }
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_item(&self) -> &TextItem {
        &self.text_item
    }

    pub fn text_item_mut(&mut self) -> &mut TextItem {
        &mut self.text_item
    }

    pub fn background_color(&self) -> Rgb<u8> {
        self.background_color
    }

    /// Makes the solid color the visible background, dropping any image.
    pub fn set_background_color(&mut self, color: Rgb<u8>) {
        self.background_color = color;
        self.background_image = None;
    }

    pub fn background_image(&self) -> Option<&Arc<RgbaImage>> {
        self.background_image.as_ref()
    }

    /// `None` reveals the last background color again.
    pub fn set_background_image(&mut self, image: Option<Arc<RgbaImage>>) {
        self.background_image = image;
    }

    pub fn gradient_overlay_color(&self) -> Option<Rgb<u8>> {
        self.gradient_overlay_color
    }

    pub fn set_gradient_overlay_color(&mut self, color: Option<Rgb<u8>>) {
        self.gradient_overlay_color = color;
    }

    /// Places a new icon centered at `(x, y)` on top of the others.
    pub fn add_icon(&mut self, bitmap: Arc<RgbaImage>, x: i32, y: i32) -> IconId {
        let id = IconId(self.next_icon_id);
        self.next_icon_id += 1;
        self.icons.push(PlacedIcon {
            id,
            item: ImageItem::new(bitmap, x, y),
        });
        log::debug!("icon {id:?} added at ({x}, {y})");
        id
    }

    /// Topmost icon containing the point.
    pub fn find_icon_at(&self, x: i32, y: i32) -> Option<IconId> {
        self.icons
            .iter()
            .rev()
            .find(|icon| icon.item.contains(x, y))
            .map(|icon| icon.id)
    }

    /// Removes the topmost icon containing the point. No-op on a miss.
    pub fn remove_icon_at(&mut self, x: i32, y: i32) -> Option<ImageItem> {
        let index = self.icons.iter().rposition(|icon| icon.item.contains(x, y))?;
        let removed = self.icons.remove(index);
        log::debug!("icon {:?} removed", removed.id);
        Some(removed.item)
    }

    /// Relocates an icon. Returns `false` if the icon no longer exists.
    pub fn move_icon(&mut self, id: IconId, dx: i32, dy: i32) -> bool {
        match self.icons.iter_mut().find(|icon| icon.id == id) {
            Some(icon) => {
                icon.item.move_by(dx, dy);
                true
            }
            None => false,
        }
    }

    pub fn icon(&self, id: IconId) -> Option<&ImageItem> {
        self.icons.iter().find(|icon| icon.id == id).map(|icon| &icon.item)
    }

    /// Icons in paint order.
    pub fn icons(&self) -> impl Iterator<Item = &ImageItem> {
        self.icons.iter().map(|icon| &icon.item)
    }

    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    /// Starts a new picture: no icons, default caption settings with empty
    /// text, the default overlay and no background image. The background
    /// color is kept.
    pub fn clear(&mut self) {
        self.icons.clear();
        self.text_item = TextItem::default();
        self.gradient_overlay_color = Some(DEFAULT_OVERLAY);
        self.background_image = None;
    }

    /// Composes the picture at `width` x `height`.
    ///
    /// Reads nothing but the surface and `fonts`, so unchanged state renders
    /// to identical bytes.
    pub fn render(&self, width: u32, height: u32, fonts: &FontBook) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(width, height, opaque(self.background_color));
        if width == 0 || height == 0 {
            return canvas;
        }

        if let Some(background) = &self.background_image {
            let scaled = if background.dimensions() == (width, height) {
                background.as_ref().clone()
            } else {
                imageops::resize(background.as_ref(), width, height, imageops::FilterType::Triangle)
            };
            // Images with transparency still sit on the background color.
            imageops::overlay(&mut canvas, &scaled, 0, 0);
        }

        if let Some(color) = self.gradient_overlay_color {
            apply_gradient_overlay(&mut canvas, color);
        }

        self.text_item.draw(&mut canvas, fonts);

        for icon in &self.icons {
            icon.item.draw(&mut canvas);
        }

        canvas
    }
}
