//! Logging for the binary. Library code only uses the `log` macros.

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// Crates that flood the log at `info` while a window is open.
const NOISY_MODULES: &[&str] = &["wgpu_core", "wgpu_hal", "naga", "cosmic_text", "fontdb"];

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` directives such as `"debug"` or `"sayings=trace"`.
    /// Wins over `RUST_LOG`.
    pub filter: Option<String>,
    /// Never emit ANSI colors.
    pub plain: bool,
}

impl LoggingConfig {
    /// Configured directives, else `rust_log`. `None` means the built-in
    /// defaults apply.
    fn directives(&self, rust_log: Option<String>) -> Option<String> {
        self.filter
            .clone()
            .or(rust_log)
            .filter(|directives| !directives.trim().is_empty())
    }

    fn builder(&self, rust_log: Option<String>) -> Builder {
        let mut builder = Builder::new();
        match self.directives(rust_log) {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder.filter_level(LevelFilter::Info);
                for module in NOISY_MODULES {
                    builder.filter_module(module, LevelFilter::Warn);
                }
            }
        }
        builder.write_style(if self.plain {
            WriteStyle::Never
        } else {
            WriteStyle::Auto
        });
        builder
    }
}

/// Installs the global logger. A logger installed earlier stays in place.
pub fn init_logging(config: &LoggingConfig) {
    let rust_log = std::env::var("RUST_LOG").ok();
    match config.builder(rust_log).try_init() {
        Ok(()) => log::debug!("logging initialized"),
        Err(err) => log::debug!("keeping the existing logger: {err}"),
    }
}
