use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use fontdb::{Database, FaceInfo, Family, ID, Query, Style, Weight};
use image::{Rgb, RgbaImage};
use rusttype::{Font, Scale, point};

use super::layout::TextMetrics;
use crate::color::blend_coverage;
use crate::error::SceneError;

/// Families offered ahead of the installed ones; each resolves to the first
/// well-known face the system has.
pub const LOGICAL_FAMILIES: [&str; 3] = ["Serif", "SansSerif", "Monospace"];

const SERIF_FACES: &[&str] = &[
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
    "FreeSerif",
    "Times New Roman",
    "Georgia",
];
const SANS_FACES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Arial",
    "Helvetica",
];
const MONO_FACES: &[&str] = &[
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "FreeMono",
    "Courier New",
    "Menlo",
];

/// Family and style of a face, as its name and OS/2 tables report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceKey {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FaceKey {
    fn from_info(info: &FaceInfo) -> Option<Self> {
        let (family, _) = info.families.first()?;
        Some(FaceKey {
            family: family.clone(),
            bold: info.weight >= Weight::SEMIBOLD,
            italic: info.style != Style::Normal,
        })
    }
}

/// Every font face the application can draw with.
///
/// The face database is immutable after loading. Faces are parsed for
/// rasterizing the first time they are asked for. An empty book is valid:
/// text simply isn't drawn.
pub struct FontBook {
    db: Database,
    parsed: Mutex<HashMap<ID, Font<'static>>>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::from_database(Database::new())
    }
}

impl FontBook {
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_database(db: Database) -> Self {
        Self {
            db,
            parsed: Mutex::new(HashMap::new()),
        }
    }

    /// Loads the platform's installed fonts plus everything under `extra_dirs`.
    pub fn discover(extra_dirs: &[PathBuf]) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            let before = db.len();
            db.load_fonts_dir(dir);
            log::debug!("loaded {} font faces from {}", db.len() - before, dir.display());
        }

        let book = Self::from_database(db);
        if book.is_empty() {
            log::warn!("no usable fonts found; captions will not be drawn");
        } else {
            log::info!(
                "font discovery found {} faces in {} families",
                book.face_count(),
                book.families().len()
            );
        }
        book
    }

    /// Adds the faces contained in an in-memory font file.
    pub fn add_font_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), SceneError> {
        let before = self.db.len();
        self.db.load_font_data(bytes);
        if self.db.len() == before {
            return Err(SceneError::FontLoad {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Distinct family names, sorted case-insensitively. Hidden system
    /// families (leading `.`) are left out.
    pub fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .filter_map(|info| info.families.first())
            .map(|(name, _)| name.clone())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort_by_key(|n| n.to_lowercase());
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        names
    }

    /// The face a request for `family` resolves to.
    pub fn face_key(&self, family: &str, bold: bool, italic: bool) -> Option<FaceKey> {
        let id = self.resolve(family, bold, italic)?;
        self.db.face(id).and_then(FaceKey::from_info)
    }

    /// Face for `family` at `size_px`, or `None` when the book is empty.
    pub fn scaled(&self, family: &str, bold: bool, italic: bool, size_px: f32) -> Option<ScaledFace> {
        let id = self.resolve(family, bold, italic)?;
        Some(ScaledFace {
            font: self.font(id)?,
            scale: Scale::uniform(size_px),
        })
    }

    /// Named family (or the logical family's candidates) first, then the
    /// closest style among all faces.
    fn resolve(&self, family: &str, bold: bool, italic: bool) -> Option<ID> {
        let names = candidates(family);
        let mut families: Vec<Family<'_>> = names.iter().map(|name| Family::Name(name)).collect();
        if let Some(generic) = generic_family(family) {
            families.push(generic);
        }
        let query = Query {
            families: &families,
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            style: if italic { Style::Italic } else { Style::Normal },
            ..Query::default()
        };
        self.db.query(&query).or_else(|| self.closest_any(bold, italic))
    }

    /// Independent of load order so the same database always picks the same face.
    fn closest_any(&self, bold: bool, italic: bool) -> Option<ID> {
        self.db
            .faces()
            .filter_map(|info| FaceKey::from_info(info).map(|key| (key, info)))
            .min_by_key(|(key, info)| {
                let mismatch = u8::from(key.bold != bold) + u8::from(key.italic != italic);
                (mismatch, key.family.to_lowercase(), info.post_script_name.clone())
            })
            .map(|(_, info)| info.id)
    }

    fn font(&self, id: ID) -> Option<Font<'static>> {
        let mut parsed = self.parsed.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(font) = parsed.get(&id) {
            return Some(font.clone());
        }

        let font = self
            .db
            .with_face_data(id, |data, index| Font::try_from_vec_and_index(data.to_vec(), index))
            .flatten();
        match font {
            Some(font) => {
                parsed.insert(id, font.clone());
                Some(font)
            }
            None => {
                log::debug!("face {id:?} could not be parsed for rasterizing");
                None
            }
        }
    }
}

fn candidates(family: &str) -> Vec<&str> {
    match family {
        "Serif" => SERIF_FACES.to_vec(),
        "SansSerif" => SANS_FACES.to_vec(),
        "Monospace" => MONO_FACES.to_vec(),
        other => vec![other],
    }
}

fn generic_family(family: &str) -> Option<Family<'static>> {
    match family {
        "Serif" => Some(Family::Serif),
        "SansSerif" => Some(Family::SansSerif),
        "Monospace" => Some(Family::Monospace),
        _ => None,
    }
}

/// A face bound to a pixel size.
pub struct ScaledFace {
    font: Font<'static>,
    scale: Scale,
}

impl ScaledFace {
    /// Rasterizes one line with its baseline starting at `(x, baseline)`.
    pub fn draw_line(&self, canvas: &mut RgbaImage, text: &str, x: f32, baseline: f32, color: Rgb<u8>) {
        let (w, h) = canvas.dimensions();
        for glyph in self.font.layout(text, self.scale, point(x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < h {
                    blend_coverage(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
                }
            });
        }
    }
}

impl TextMetrics for ScaledFace {
    fn width(&self, text: &str) -> f32 {
        self.font
            .layout(text, self.scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn ascent(&self) -> f32 {
        self.font.v_metrics(self.scale).ascent
    }

    fn line_height(&self) -> f32 {
        let v = self.font.v_metrics(self.scale);
        v.ascent - v.descent + v.line_gap
    }
}
