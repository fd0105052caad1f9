use clap::Parser;

use sayings::config::Cli;
use sayings::gui_app::run_iced_app;
use sayings::logging::init_logging;

fn main() -> iced::Result {
    let config = Cli::parse().into_config();
    init_logging(&config.logging);

    log::info!(
        "Sayings - starting GUI ({}x{} canvas)",
        config.canvas_width,
        config.canvas_height
    );
    run_iced_app(config)
}
