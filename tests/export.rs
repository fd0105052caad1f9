use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use sayings::SceneError;
use sayings::files::{ExportFormat, FileSystem, StdFileSystem, export_image, load_background};

#[derive(Default)]
struct RecordingFs {
    writes: RefCell<Vec<(PathBuf, Vec<u8>)>>,
}

impl FileSystem for RecordingFs {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

struct FailingFs;

impl FileSystem for FailingFs {
    fn write(&self, _path: &Path, _bytes: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

fn sample() -> RgbaImage {
    RgbaImage::from_fn(16, 12, |x, y| Rgba([(x * 15) as u8, (y * 20) as u8, 128, 255]))
}

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sayings-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir.join(name)
}

#[test]
fn png_export_writes_a_png() {
    let fs = RecordingFs::default();
    let format = export_image(&sample(), Path::new("out/saying.png"), &fs).expect("export failed");
    assert_eq!(format, ExportFormat::Png);

    let writes = fs.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, PathBuf::from("out/saying.png"));
    assert!(writes[0].1.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn jpeg_export_accepts_both_extensions() {
    for name in ["saying.jpeg", "SAYING.JPG"] {
        let fs = RecordingFs::default();
        let format = export_image(&sample(), Path::new(name), &fs).expect("export failed");
        assert_eq!(format, ExportFormat::Jpeg);
        let writes = fs.writes.borrow();
        assert!(writes[0].1.starts_with(&[0xFF, 0xD8]), "{name}");
    }
}

#[test]
fn unsupported_extension_writes_nothing() {
    let fs = RecordingFs::default();
    let err = export_image(&sample(), Path::new("saying.gif"), &fs).expect_err("gif accepted");
    assert!(matches!(err, SceneError::UnsupportedFormat { .. }));

    let err = export_image(&sample(), Path::new("saying"), &fs).expect_err("no extension accepted");
    assert!(matches!(err, SceneError::UnsupportedFormat { .. }));
    assert!(fs.writes.borrow().is_empty());
}

#[test]
fn failed_write_is_reported() {
    let err = export_image(&sample(), Path::new("saying.png"), &FailingFs).expect_err("write succeeded");
    match err {
        SceneError::WriteFailure { path, reason } => {
            assert_eq!(path, PathBuf::from("saying.png"));
            assert!(reason.contains("read-only"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn exported_png_loads_back_as_background() {
    let path = scratch_path("roundtrip.png");
    export_image(&sample(), &path, &StdFileSystem).expect("export failed");

    let loaded = load_background(&path).expect("load failed");
    assert_eq!(loaded.as_raw(), sample().as_raw());
    std::fs::remove_file(&path).ok();
}

#[test]
fn undecodable_file_is_a_decode_failure() {
    let path = scratch_path("not-an-image.png");
    std::fs::write(&path, b"definitely not a png").expect("failed to write scratch file");

    let err = load_background(&path).expect_err("garbage decoded");
    assert!(matches!(err, SceneError::DecodeFailure { .. }));

    let missing = scratch_path("missing.png");
    assert!(matches!(
        load_background(&missing),
        Err(SceneError::DecodeFailure { .. })
    ));
    std::fs::remove_file(&path).ok();
}
