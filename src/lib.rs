//! Sayings: compose a picture from a background, a styled caption and
//! decorative icons, then export it as PNG or JPEG.
//!
//! The scene model and rendering are toolkit-independent; `gui_app` wires
//! them to an iced window.

pub mod color;
pub mod commands;
pub mod config;
pub mod error;
pub mod files;
pub mod gui_app;
pub mod icon_palette;
pub mod logging;
pub mod resources;
pub mod scene;
pub mod text;

pub use error::SceneError;
