//! Native modal dialogs, run as iced tasks.

use std::path::PathBuf;

use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::files::DEFAULT_EXPORT_NAME;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

pub async fn pick_background_file() -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title("Select Background Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .map(|file| file.path().to_path_buf())
}

pub async fn pick_output_file(start_dir: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Select Output File")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("PNG image", &["png"])
        .add_filter("JPEG image", &["jpeg", "jpg"]);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file().await.map(|file| file.path().to_path_buf())
}

/// Blocks the command until the user dismisses the message.
pub async fn show_notice(description: String) {
    AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Sayings")
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
