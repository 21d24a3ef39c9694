//! Command-line interface for strictly_sodas.

use clap::Parser;
use std::path::PathBuf;

/// Strictly Sodas - line up the sodas in the hidden order
#[derive(Parser, Debug)]
#[command(name = "strictly_sodas")]
#[command(about = "Terminal soda-lineup puzzle", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "strictly_sodas.toml")]
    pub config: PathBuf,

    /// Database file, overriding the config
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Seed for reproducible deals, overriding the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file, overriding the config
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
