//! Terminal front end: configuration, logging, the event loop and text rendering.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

use clap::Parser;

use cli::Cli;

/// Parses the command line and runs the browser until the user quits.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = config::AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    logging::initialize(config.log, ghibli_logging::default_level());
    ghibli_logging::ghibli_info!("Starting against {}", config.base_url);
    app::run_app(&config)
}
