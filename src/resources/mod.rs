//! Read-only picture resources bundled with the application: stock
//! backgrounds, the icon palette and toolbar thumbnails.
//!
//! Built once at startup and handed to whoever needs them.

pub mod backgrounds;
pub mod icons;

use std::sync::Arc;

use image::{RgbaImage, imageops};

pub use backgrounds::{STOCK_HEIGHT, STOCK_WIDTH, StockBackground};
pub use icons::{ICON_SIZE, IconKind, IconPalette, PaletteIcon, color_swatch};

const THUMB_WIDTH: u32 = 64;
const THUMB_HEIGHT: u32 = 48;

#[derive(Debug, Clone)]
pub struct StockEntry {
    pub background: StockBackground,
    pub image: Arc<RgbaImage>,
    pub thumbnail: Arc<RgbaImage>,
}

#[derive(Debug, Clone)]
pub struct Resources {
    backgrounds: Vec<StockEntry>,
    icons: IconPalette,
    color_swatch: Arc<RgbaImage>,
}

impl Resources {
    /// Generates every bundled resource at its native size.
    pub fn bundled() -> Self {
        Self::with_stock_size(STOCK_WIDTH, STOCK_HEIGHT)
    }

    pub fn with_stock_size(width: u32, height: u32) -> Self {
        let backgrounds = StockBackground::ALL
            .into_iter()
            .map(|background| {
                let image = background.render(width, height);
                let thumbnail = imageops::thumbnail(&image, THUMB_WIDTH, THUMB_HEIGHT);
                StockEntry {
                    background,
                    image: Arc::new(image),
                    thumbnail: Arc::new(thumbnail),
                }
            })
            .collect();
        log::debug!("generated stock backgrounds at {width}x{height}");

        Self {
            backgrounds,
            icons: IconPalette::bundled(),
            color_swatch: Arc::new(color_swatch()),
        }
    }

    pub fn backgrounds(&self) -> &[StockEntry] {
        &self.backgrounds
    }

    pub fn background(&self, background: StockBackground) -> Option<Arc<RgbaImage>> {
        self.backgrounds
            .iter()
            .find(|e| e.background == background)
            .map(|e| Arc::clone(&e.image))
    }

    pub fn icons(&self) -> &IconPalette {
        &self.icons
    }

    pub fn color_swatch(&self) -> &Arc<RgbaImage> {
        &self.color_swatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stock_background_is_available_with_thumbnail() {
        let resources = Resources::with_stock_size(96, 72);
        for bg in StockBackground::ALL {
            let image = resources.background(bg).expect("stock image");
            assert_eq!(image.dimensions(), (96, 72));
        }
        for entry in resources.backgrounds() {
            assert_eq!(entry.thumbnail.dimensions(), (THUMB_WIDTH, THUMB_HEIGHT));
        }
    }
}
