//! Caption model: attributes, layout, font lookup and the font picker menu.

pub mod font_menu;
pub mod fonts;
pub mod item;
pub mod layout;

pub use font_menu::{FontGroup, FontMenu, group_font_names};
pub use fonts::{FaceKey, FontBook, LOGICAL_FAMILIES, ScaledFace};
pub use item::TextItem;
pub use layout::{Justify, PlacedLine, TextMetrics};
