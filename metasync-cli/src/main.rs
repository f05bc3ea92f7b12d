//! metasync — App Store metadata translation sync CLI.
//!
//! # Usage
//!
//! ```text
//! metasync download --itunes-locale <locale> [--onesky-locale <locale>] [--dry-run]
//! metasync upload [--itunes-locale <locale>] [--onesky-locale <locale>]
//!                 [--skip-if-in-translation <bool>] [--dry-run]
//! ```
//!
//! Credentials come from `--public-key` / `--secret-key` / `--project-id`,
//! the `ONESKY_*` environment variables, or a `metasync.yaml` config file.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{download::DownloadArgs, upload::UploadArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "metasync",
    version,
    about = "Sync localized App Store metadata with a OneSky translation project",
    long_about = None,
)]
struct Cli {
    /// Config file to use instead of ./metasync.yaml or the user config.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log sync decisions to stderr (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download translated metadata for one locale into field files.
    Download(DownloadArgs),

    /// Upload one locale's field files to OneSky.
    Upload(UploadArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Download(args) => args.run(config),
        Commands::Upload(args) => args.run(config),
    }
}
