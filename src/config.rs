use std::path::PathBuf;

use clap::Parser;

use crate::files::default_export_dir;
use crate::logging::LoggingConfig;

pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Launch options. Nothing is persisted between runs.
#[derive(Parser, Debug)]
#[command(
    name = "sayings",
    about = "Compose a picture from a background, a caption and icons",
    version
)]
pub struct Cli {
    /// Width of the picture in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH, value_parser = clap::value_parser!(u32).range(16..=8192))]
    pub width: u32,

    /// Height of the picture in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT, value_parser = clap::value_parser!(u32).range(16..=8192))]
    pub height: u32,

    /// Extra directory to search for .ttf/.otf fonts (repeatable)
    #[arg(long = "font-dir", value_name = "DIR")]
    pub font_dirs: Vec<PathBuf>,

    /// Log filter in env_logger syntax, e.g. "debug" or "sayings=trace"
    #[arg(long = "log-filter", value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Log without colors
    #[arg(long = "plain-log")]
    pub plain_log: bool,
}

/// Everything the application needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_dirs: Vec<PathBuf>,
    pub logging: LoggingConfig,
    /// Initial folder for the save dialog.
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            font_dirs: Vec::new(),
            logging: LoggingConfig::default(),
            export_dir: None,
        }
    }
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            canvas_width: self.width,
            canvas_height: self.height,
            font_dirs: self.font_dirs,
            logging: LoggingConfig {
                filter: self.log_filter,
                plain: self.plain_log,
            },
            export_dir: default_export_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let config = Cli::parse_from(["sayings"]).into_config();
        assert_eq!((config.canvas_width, config.canvas_height), (800, 600));
        assert!(config.font_dirs.is_empty());
        assert!(config.logging.filter.is_none());
        assert!(!config.logging.plain);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "sayings",
            "--width",
            "1024",
            "--height",
            "768",
            "--font-dir",
            "/a",
            "--font-dir",
            "/b",
            "--log-filter",
            "debug",
            "--plain-log",
        ]);
        let config = cli.into_config();
        assert_eq!((config.canvas_width, config.canvas_height), (1024, 768));
        assert_eq!(config.font_dirs, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(config.logging.filter.as_deref(), Some("debug"));
        assert!(config.logging.plain);
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        assert!(Cli::try_parse_from(["sayings", "--width", "2"]).is_err());
    }
}
