//! The iced front end: toolbar, caption panel, icon bar and the picture canvas.

mod canvas;
mod dialogs;
pub mod iced_ui;

pub use iced_ui::run_iced_app;
