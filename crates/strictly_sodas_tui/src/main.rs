//! Strictly Sodas - terminal soda-lineup puzzle.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use strictly_sodas_tui::{Cli, GameConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config =
        GameConfig::load_or_default(&cli.config)?.with_overrides(cli.db_path, cli.log_file, cli.seed);

    // Log to a file so traces do not corrupt the terminal
    let log_file = std::fs::File::create(config.log_file())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(config = ?config, "Configuration resolved");
    strictly_sodas_tui::run(&config)
}
