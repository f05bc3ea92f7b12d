//! `metasync upload` — submit one locale's field files as a single document.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use metasync_core::{Locale, LocaleMapping, SubmitOutcome};
use metasync_onesky::OneSkyClient;
use metasync_sync::{upload, UploadReport, UploadRequest, UploadStatus};

use super::{print_warnings, resolve_config, ConnectionArgs};

/// Arguments for `metasync upload`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Locale of the metadata directory for the App Store [default: en-US].
    #[arg(long)]
    pub itunes_locale: Option<String>,

    /// Locale of the metadata on OneSky (defaults to `--itunes-locale`).
    #[arg(long)]
    pub onesky_locale: Option<String>,

    /// Skip the upload while the document is in translation on OneSky [default: true].
    #[arg(long, env = "ONESKY_SKIP_IF_IN_TRANSLATION", value_name = "BOOL")]
    pub skip_if_in_translation: Option<bool>,

    /// Print the assembled document instead of uploading it.
    #[arg(long)]
    pub dry_run: bool,
}

impl UploadArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let config = resolve_config(config_path, &self.connection, self.skip_if_in_translation)?;
        let locales = LocaleMapping::for_upload(
            self.itunes_locale.map(Locale::from),
            self.onesky_locale.map(Locale::from),
        );

        println!("Loading metadata from {}", locales.local);
        let client = OneSkyClient::new(config.credentials.clone());
        let report = upload(
            &client,
            &UploadRequest {
                project_id: &config.project_id,
                locales: &locales,
                metadata_root: &config.metadata_root,
                skip_if_in_translation: config.skip_if_in_translation,
                dry_run: self.dry_run,
            },
        )
        .with_context(|| format!("upload failed for '{}'", locales.local))?;

        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &UploadReport) {
    print_warnings(&report.warnings);

    if report.keyword_count == 1 {
        println!("Found 1 keyword");
    } else {
        println!("Found {} keywords", report.keyword_count);
    }

    match report.status {
        UploadStatus::DryRun => {
            let pretty = serde_json::from_str::<serde_json::Value>(&report.document)
                .and_then(|v| serde_json::to_string_pretty(&v))
                .unwrap_or_else(|_| report.document.clone());
            println!("[dry-run] would upload for {}:", report.locale);
            println!("{pretty}");
        }
        UploadStatus::Submitted(SubmitOutcome::Submitted) => {
            println!(
                "{}",
                format!("✓ Uploaded app metadata for {}", report.locale).green()
            );
        }
        UploadStatus::Submitted(SubmitOutcome::SkippedInTranslation) => {
            println!(
                "{}",
                format!(
                    "Skipped upload for {}: document is in translation",
                    report.locale
                )
                .yellow()
            );
        }
    }
}
