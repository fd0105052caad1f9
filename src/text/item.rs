use image::{Rgb, RgbaImage};

use super::fonts::FontBook;
use super::layout::{Justify, PlacedLine, TextMetrics, layout_text};
use crate::color::BLACK;
use crate::error::SceneError;

pub const DEFAULT_FONT: &str = "Serif";
pub const DEFAULT_SIZE: u32 = 24;

/// The caption drawn over the background.
///
/// Size and line spacing are always positive; the setters reject anything
/// else and keep the previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    text: String,
    font_family: String,
    bold: bool,
    italic: bool,
    size_pt: u32,
    color: Rgb<u8>,
    justify: Justify,
    line_height_multiplier: f32,
}

impl Default for TextItem {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: DEFAULT_FONT.to_string(),
            bold: false,
            italic: false,
            size_pt: DEFAULT_SIZE,
            color: BLACK,
            justify: Justify::Left,
            line_height_multiplier: 1.0,
        }
    }
}

impl TextItem {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font_name(&self) -> &str {
        &self.font_family
    }

    pub fn set_font_name(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn font_size(&self) -> u32 {
        self.size_pt
    }

    /// Takes a signed value so non-positive input from the UI can be rejected
    /// here rather than silently wrapped.
    pub fn set_font_size(&mut self, size: i64) -> Result<(), SceneError> {
        match u32::try_from(size) {
            Ok(size) if size > 0 => {
                self.size_pt = size;
                Ok(())
            }
            _ => Err(SceneError::invalid("text size", size)),
        }
    }

    pub fn line_height_multiplier(&self) -> f32 {
        self.line_height_multiplier
    }

    pub fn set_line_height_multiplier(&mut self, multiplier: f32) -> Result<(), SceneError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(SceneError::invalid("line spacing", multiplier));
        }
        self.line_height_multiplier = multiplier;
        Ok(())
    }

    pub fn justify(&self) -> Justify {
        self.justify
    }

    pub fn set_justify(&mut self, justify: Justify) {
        self.justify = justify;
    }

    pub fn color(&self) -> Rgb<u8> {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb<u8>) {
        self.color = color;
    }

    /// Lines as they would be placed on a `width` x `height` canvas.
    pub fn layout(&self, metrics: &dyn TextMetrics, width: u32, height: u32) -> Vec<PlacedLine> {
        layout_text(
            &self.text,
            metrics,
            width as f32,
            height as f32,
            self.line_height_multiplier,
            self.justify,
        )
    }

    /// Draws the caption centered in the canvas. Without a usable font the
    /// canvas is left untouched.
    pub fn draw(&self, canvas: &mut RgbaImage, fonts: &FontBook) {
        if self.text.is_empty() {
            return;
        }
        let Some(face) = fonts.scaled(&self.font_family, self.bold, self.italic, self.size_pt as f32) else {
            log::trace!("no font face for {:?}; caption skipped", self.font_family);
            return;
        };

        let (width, height) = canvas.dimensions();
        for line in self.layout(&face, width, height) {
            face.draw_line(canvas, &line.text, line.x, line.baseline, self.color);
        }
    }
}
