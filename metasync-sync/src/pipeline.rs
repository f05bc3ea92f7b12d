//! Download and upload passes for a single locale.
//!
//! Both passes are single-shot and fail fast: the first fatal error ends the
//! pass and is returned unchanged. Soft warnings are collected into the
//! report and never alter control flow.

use std::path::Path;

use metasync_core::{
    assembler, Connection, ExportEnvelope, FileFormat, Locale, LocaleFieldSet, LocaleMapping,
    MetadataError, MetadataField, ProjectId, Submission, SubmitOutcome, SyncWarning,
    UPLOAD_FILE_NAME,
};

use crate::error::SyncError;
use crate::store::{self, WriteResult};

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// Inputs for [`download`].
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    pub project_id: &'a ProjectId,
    pub locales: &'a LocaleMapping,
    pub metadata_root: &'a Path,
    pub dry_run: bool,
}

/// Outcome of a download pass.
#[derive(Debug)]
pub struct DownloadReport {
    /// On-disk locale the files were written under.
    pub locale: Locale,
    pub writes: Vec<WriteResult>,
    pub warnings: Vec<SyncWarning>,
}

impl DownloadReport {
    /// `true` when the platform had nothing for the locale.
    pub fn is_empty_export(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, SyncWarning::EmptyExport { .. }))
    }
}

fn parse_export(raw: &str) -> Result<ExportEnvelope, SyncError> {
    serde_json::from_str(raw)
        .map_err(MetadataError::Parse)
        .map_err(SyncError::from)
}

/// Pull the translated document for `locales.remote` and write its fields
/// under `<metadata_root>/<locales.local>/`.
pub fn download<C: Connection>(
    connection: &C,
    request: &DownloadRequest<'_>,
) -> Result<DownloadReport, SyncError> {
    let locales = request.locales;
    tracing::info!("downloading app metadata for {}", locales.remote);

    let raw = connection
        .export(request.project_id, &locales.remote)
        .map_err(|e| SyncError::Transport(Box::new(e)))?;

    let document = if raw.is_empty() {
        None
    } else {
        parse_export(&raw)?.data
    };
    let Some(document) = document else {
        let warning = SyncWarning::EmptyExport {
            locale: locales.remote.clone(),
        };
        tracing::info!("{warning}");
        return Ok(DownloadReport {
            locale: locales.local.clone(),
            writes: Vec::new(),
            warnings: vec![warning],
        });
    };

    let converted = assembler::remote_to_local(&document, locales)?;

    let mut writes = Vec::with_capacity(converted.set.fields.len());
    for (field, content) in &converted.set.fields {
        let result = store::write_field(
            request.metadata_root,
            &converted.set.locale,
            *field,
            content,
            request.dry_run,
        )?;
        writes.push(result);
    }

    tracing::info!("saved app metadata for {}", locales.local);
    Ok(DownloadReport {
        locale: converted.set.locale,
        writes,
        warnings: converted.warnings,
    })
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// Inputs for [`upload`].
#[derive(Debug, Clone)]
pub struct UploadRequest<'a> {
    pub project_id: &'a ProjectId,
    pub locales: &'a LocaleMapping,
    pub metadata_root: &'a Path,
    pub skip_if_in_translation: bool,
    /// Assemble and encode, but do not submit.
    pub dry_run: bool,
}

/// How an upload pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Submitted(SubmitOutcome),
    DryRun,
}

/// Outcome of an upload pass.
#[derive(Debug)]
pub struct UploadReport {
    /// Platform locale the document was addressed to.
    pub locale: Locale,
    pub keyword_count: usize,
    /// Encoded document as submitted.
    pub document: String,
    pub status: UploadStatus,
    pub warnings: Vec<SyncWarning>,
}

/// Read all four fields for `locales.local`. Fails on the first missing or
/// unreadable file.
pub fn read_locale(root: &Path, locale: &Locale) -> Result<LocaleFieldSet, SyncError> {
    let mut set = LocaleFieldSet::new(locale.clone());
    for field in MetadataField::all() {
        set.insert(*field, store::read_field(root, locale, *field)?);
    }
    Ok(set)
}

/// Read the local fields for `locales.local`, assemble the document and
/// submit it for `locales.remote`. Missing strings are always deprecated.
pub fn upload<C: Connection>(
    connection: &C,
    request: &UploadRequest<'_>,
) -> Result<UploadReport, SyncError> {
    let locales = request.locales;
    tracing::info!("loading metadata from {}", locales.local);

    let set = read_locale(request.metadata_root, &locales.local)?;
    let payload = assembler::local_to_remote(&set, locales);
    let document = serde_json::to_string(&payload.document).map_err(SyncError::Serialize)?;
    tracing::info!("formatted app metadata for upload");

    let status = if request.dry_run {
        tracing::info!("[dry-run] would upload {UPLOAD_FILE_NAME} for {}", payload.locale);
        UploadStatus::DryRun
    } else {
        let submission = Submission {
            project_id: request.project_id,
            locale: &payload.locale,
            file_name: UPLOAD_FILE_NAME,
            format: FileFormat::HierarchicalJson,
            content: &document,
            skip_if_in_translation: request.skip_if_in_translation,
            deprecate_missing: true,
        };
        let outcome = connection
            .submit(&submission)
            .map_err(|e| SyncError::Transport(Box::new(e)))?;
        UploadStatus::Submitted(outcome)
    };

    Ok(UploadReport {
        locale: payload.locale,
        keyword_count: payload.keyword_count,
        document,
        status,
        warnings: payload.warnings,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
