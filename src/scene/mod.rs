//! Scene model: the surface, its icons and the compositing passes.

mod image_item;
mod overlay;
mod surface;

pub use image_item::ImageItem;
pub use overlay::{OVERLAY_MAX_ALPHA, apply_gradient_overlay};
pub use surface::{DEFAULT_OVERLAY, IconId, SceneSurface};
