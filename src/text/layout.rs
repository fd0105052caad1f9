//! Line breaking and placement for the caption.
//!
//! Everything here is measurement arithmetic over [`TextMetrics`]; no glyphs
//! are touched, so the layout can be checked with a fixed-width fake.

/// Horizontal inset kept free on both sides of the canvas.
pub const MARGIN: f32 = 10.0;

/// Font measurements for one face at one size, in pixels.
pub trait TextMetrics {
    /// Advance width of `text` laid out on a single line.
    fn width(&self, text: &str) -> f32;
    /// Distance from the top of a line to its baseline.
    fn ascent(&self) -> f32;
    /// Nominal line height: ascent - descent + line gap.
    fn line_height(&self) -> f32;
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    pub const ALL: [Justify; 3] = [Justify::Left, Justify::Center, Justify::Right];
}

impl std::fmt::Display for Justify {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Justify::Left => "Left",
            Justify::Center => "Center",
            Justify::Right => "Right",
        })
    }
}

/// A physical line with its pen position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub width: f32,
}

/// Breaks `text` into physical lines and positions them inside a
/// `surface_width` x `surface_height` canvas.
///
/// The block is centered vertically; each line is justified horizontally
/// inside [`MARGIN`].
pub fn layout_text(
    text: &str,
    metrics: &dyn TextMetrics,
    surface_width: f32,
    surface_height: f32,
    line_height_multiplier: f32,
    justify: Justify,
) -> Vec<PlacedLine> {
    if text.is_empty() {
        return Vec::new();
    }

    let available = (surface_width - 2.0 * MARGIN).max(1.0);
    let lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .flat_map(|l| wrap_line(l, metrics, available))
        .collect();

    let nominal = metrics.line_height();
    let advance = nominal * line_height_multiplier;
    let block_height = (lines.len().saturating_sub(1)) as f32 * advance + nominal;
    let top = (surface_height - block_height) / 2.0;

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = metrics.width(&text);
            let x = match justify {
                Justify::Left => MARGIN,
                Justify::Right => surface_width - MARGIN - width,
                Justify::Center => (surface_width - width) / 2.0,
            };
            PlacedLine {
                baseline: top + i as f32 * advance + metrics.ascent(),
                text,
                x,
                width,
            }
        })
        .collect()
}

/// Greedy word wrap of one logical line. Blank input yields one empty line.
fn wrap_line(line: &str, metrics: &dyn TextMetrics, max_width: f32) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if metrics.width(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }

        if metrics.width(word) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = break_word(word, metrics, max_width);
            current = pieces.pop().unwrap_or_default();
            out.extend(pieces);
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Splits a single overlong word between characters. Every piece holds at
/// least one character, even if that character alone overflows.
fn break_word(word: &str, metrics: &dyn TextMetrics, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if metrics.width(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
