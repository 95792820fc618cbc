//! Command line arguments for the kbck utility

use std::path::PathBuf;

use clap::Parser;

/// Checks keybox XML files against the published attestation status list and offers to delete
/// keyboxes containing revoked certificates.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
pub struct KbckArgs {
    /// Directory containing keybox XML files (defaults to the directory holding the kbck executable)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Base URL of the attestation status list; a cache-busting query is appended
    #[arg(short, long)]
    pub url: Option<String>,

    /// Report results without offering to delete files
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Full path and filename of YAML-formatted configuration file for log4rs logging mechanism.
    /// See https://docs.rs/log4rs/latest/log4rs/ for details.
    #[arg(short = 'c', long)]
    pub logging_config: Option<String>,

    /// Log output to the console
    #[arg(short = 'l', long, conflicts_with = "logging_config", default_value_t = false)]
    pub log_to_console: bool,
}
