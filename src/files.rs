//! Image import/export and the default save location.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::SceneError;

/// File name suggested by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "saying.jpeg";

/// Raster formats the picture can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Picks the format from the path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(ExportFormat::Png),
            Some("jpg" | "jpeg") => Ok(ExportFormat::Jpeg),
            _ => Err(SceneError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Destination for encoded bytes.
pub trait FileSystem {
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;
}

/// Writes straight to disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(path, bytes)
    }
}

/// Encodes `image` in memory and hands the bytes to `fs`.
///
/// The format is validated before anything touches the file system, so an
/// unsupported extension never produces a write.
pub fn export_image(
    image: &RgbaImage,
    path: &Path,
    fs: &dyn FileSystem,
) -> Result<ExportFormat, SceneError> {
    let format = ExportFormat::from_path(path)?;
    let write_failure = |reason: String| SceneError::WriteFailure {
        path: path.to_path_buf(),
        reason,
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoded = match format {
        ExportFormat::Png => image.write_to(&mut buffer, format.image_format()),
        // JPEG has no alpha channel.
        ExportFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .write_to(&mut buffer, format.image_format()),
    };
    encoded.map_err(|e| write_failure(e.to_string()))?;

    fs.write(path, buffer.get_ref())
        .map_err(|e| write_failure(e.to_string()))?;

    log::info!(
        "exported {}x{} picture to {} as {:?}",
        image.width(),
        image.height(),
        path.display(),
        format
    );
    Ok(format)
}

/// Decodes a user-selected background image.
pub fn load_background(path: &Path) -> Result<RgbaImage, SceneError> {
    let image = image::open(path).map_err(|e| SceneError::DecodeFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::info!(
        "loaded background {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgba8())
}

/// `<home>/Desktop` when it exists. Best-effort: any failure yields `None`.
pub fn default_export_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    desktop_under(&home)
}

pub fn desktop_under(home: &Path) -> Option<PathBuf> {
    let desktop = home.join("Desktop");
    desktop.is_dir().then_some(desktop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_matching_ignores_case() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/Picture.PNG")).expect("png"),
            ExportFormat::Png
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("a.JpG")).expect("jpg"),
            ExportFormat::Jpeg
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("a.jpeg")).expect("jpeg"),
            ExportFormat::Jpeg
        );
    }

    #[test]
    fn missing_or_unknown_extension_is_unsupported() {
        for p in ["picture", "picture.gif", "picture.png.txt", ".png"] {
            let err = ExportFormat::from_path(Path::new(p)).expect_err(p);
            assert!(matches!(err, SceneError::UnsupportedFormat { .. }), "{p}");
        }
    }

    #[test]
    fn desktop_must_be_a_directory() {
        let home = std::env::temp_dir().join(format!("sayings_home_{}", std::process::id()));
        std::fs::create_dir_all(&home).expect("create home");
        assert_eq!(desktop_under(&home), None);

        std::fs::create_dir_all(home.join("Desktop")).expect("create desktop");
        assert_eq!(desktop_under(&home), Some(home.join("Desktop")));

        std::fs::remove_dir_all(&home).ok();
    }
}
