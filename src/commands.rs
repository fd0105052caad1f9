//! Edits the command surface applies to the scene.
//!
//! Each toolbar button or panel control produces one of these values; the
//! GUI never pokes the scene directly.

use std::sync::Arc;

use image::{Rgb, RgbaImage};

use crate::color::WHITE;
use crate::error::SceneError;
use crate::resources::{Resources, StockBackground};
use crate::scene::SceneSurface;
use crate::text::Justify;

#[derive(Debug, Clone, PartialEq)]
pub enum TextCommand {
    /// Blank text is ignored so an accidental OK doesn't wipe the caption.
    SetText(String),
    SetFontName(String),
    SetFontSize(i64),
    SetLineSpacing(f32),
    SetColor(Rgb<u8>),
    SetBold(bool),
    SetItalic(bool),
    SetJustify(Justify),
}

impl TextCommand {
    pub fn execute(self, scene: &mut SceneSurface) -> Result<(), SceneError> {
        let item = scene.text_item_mut();
        match self {
            TextCommand::SetText(text) => {
                if !text.trim().is_empty() {
                    item.set_text(text);
                }
            }
            TextCommand::SetFontName(name) => item.set_font_name(name),
            TextCommand::SetFontSize(size) => item.set_font_size(size)?,
            TextCommand::SetLineSpacing(multiplier) => item.set_line_height_multiplier(multiplier)?,
            TextCommand::SetColor(color) => item.set_color(color),
            TextCommand::SetBold(bold) => item.set_bold(bold),
            TextCommand::SetItalic(italic) => item.set_italic(italic),
            TextCommand::SetJustify(justify) => item.set_justify(justify),
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum BackgroundCommand {
    Stock(StockBackground),
    Image(Arc<RgbaImage>),
    Color(Rgb<u8>),
    /// Toggles the white gradient overlay.
    Overlay(bool),
}

impl BackgroundCommand {
    pub fn execute(self, scene: &mut SceneSurface, resources: &Resources) {
        match self {
            BackgroundCommand::Stock(stock) => {
                if let Some(image) = resources.background(stock) {
                    scene.set_background_image(Some(image));
                }
            }
            BackgroundCommand::Image(image) => scene.set_background_image(Some(image)),
            BackgroundCommand::Color(color) => scene.set_background_color(color),
            BackgroundCommand::Overlay(on) => scene.set_gradient_overlay_color(on.then_some(WHITE)),
        }
    }
}

/// Parses the "Set Size..." input.
pub fn parse_font_size(input: &str) -> Result<i64, SceneError> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(SceneError::invalid("text size", trimmed)),
    }
}

/// Parses the "Set Line Spacing..." input.
pub fn parse_line_spacing(input: &str) -> Result<f32, SceneError> {
    let trimmed = input.trim();
    match trimmed.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(SceneError::invalid("line spacing", trimmed)),
    }
}
