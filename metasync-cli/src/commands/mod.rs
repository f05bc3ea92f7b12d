//! Subcommands and the option/config plumbing they share.

pub mod download;
pub mod upload;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use metasync_core::{config, ConfigFile, SyncConfig, SyncWarning};

/// Platform credentials and metadata location, shared by both directions.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Public key for OneSky.
    #[arg(long, env = "ONESKY_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Secret key for OneSky.
    #[arg(long, env = "ONESKY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Project id of the iTunes App Store project on OneSky.
    #[arg(long, env = "ONESKY_ITUNES_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Path to the folder containing the metadata locale directories.
    #[arg(long, value_name = "DIR")]
    pub metadata_path: Option<PathBuf>,
}

impl ConnectionArgs {
    fn layer(&self, skip_if_in_translation: Option<bool>) -> ConfigFile {
        ConfigFile {
            public_key: self.public_key.clone(),
            secret_key: self.secret_key.clone(),
            project_id: self.project_id.clone(),
            metadata_path: self.metadata_path.clone(),
            skip_if_in_translation,
        }
    }
}

/// Merge the config file (explicit or discovered) with command-line values
/// and validate the result.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    args: &ConnectionArgs,
    skip_if_in_translation: Option<bool>,
) -> Result<SyncConfig> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;

    let path = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(&cwd),
    };
    let base = match path {
        Some(p) => config::load_at(&p)
            .with_context(|| format!("failed to load config '{}'", p.display()))?,
        None => ConfigFile::default(),
    };

    let resolved = base
        .overlay(args.layer(skip_if_in_translation))
        .validate_at(&cwd)?;
    Ok(resolved)
}

pub(crate) fn print_warnings(warnings: &[SyncWarning]) {
    for warning in warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }
}
