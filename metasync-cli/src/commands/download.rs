//! `metasync download` — pull one locale's translated metadata into field files.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use metasync_core::{Locale, LocaleMapping};
use metasync_onesky::OneSkyClient;
use metasync_sync::{download, DownloadReport, DownloadRequest, WriteResult};

use super::{print_warnings, resolve_config, ConnectionArgs};

/// Arguments for `metasync download`.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Locale of the metadata directory for the App Store (e.g. `de-DE`).
    #[arg(long)]
    pub itunes_locale: String,

    /// Locale of the metadata on OneSky (defaults to `--itunes-locale`).
    #[arg(long)]
    pub onesky_locale: Option<String>,

    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl DownloadArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = resolve_config(config_path, &self.connection, None)?;
        let locales = LocaleMapping::for_download(
            Locale::from(self.itunes_locale),
            self.onesky_locale.map(Locale::from),
        );

        println!("Downloading app metadata for {}", locales.remote);
        let client = OneSkyClient::new(config.credentials.clone());
        let report = download(
            &client,
            &DownloadRequest {
                project_id: &config.project_id,
                locales: &locales,
                metadata_root: &config.metadata_root,
                dry_run: self.dry_run,
            },
        )
        .with_context(|| format!("download failed for '{}'", locales.remote))?;

        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &DownloadReport, dry_run: bool) {
    if report.is_empty_export() {
        for warning in &report.warnings {
            println!("{warning}");
        }
        return;
    }

    print_warnings(&report.warnings);

    let prefix = if dry_run { "[dry-run] " } else { "" };
    for r in &report.writes {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
    println!(
        "{}",
        format!("{prefix}✓ Saved app metadata for {}", report.locale).green()
    );
}
