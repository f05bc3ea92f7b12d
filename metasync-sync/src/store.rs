//! Locale field store — one text file per metadata field.
//!
//! # Layout
//!
//! ```text
//! <metadata_root>/
//!   <locale>/
//!     name.txt
//!     description.txt
//!     release_notes.txt
//!     keywords.txt
//! ```
//!
//! ## `write_field` protocol
//!
//! 1. Compare the new content with what is already on disk → skip if identical.
//! 2. Create the locale directory (idempotent).
//! 3. Write to `<file>.metasync.tmp`.
//! 4. Rename to the final path (atomic on POSIX).
//!
//! Content is written verbatim. Each file is atomic on its own; the four
//! files of a locale are not written as a group.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use metasync_core::{Locale, MetadataField};

use crate::error::{read_err, write_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual field write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — on-disk content already matches.
    Unchanged { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<root>/<locale>/` — pure, no I/O.
pub fn locale_dir(root: &Path, locale: &Locale) -> PathBuf {
    root.join(locale.as_str())
}

/// `<root>/<locale>/<field filename>` — pure, no I/O.
pub fn field_path(root: &Path, locale: &Locale, field: MetadataField) -> PathBuf {
    locale_dir(root, locale).join(field.filename())
}

fn tmp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.metasync.tmp", path.display()))
}

// ---------------------------------------------------------------------------
// write_field
// ---------------------------------------------------------------------------

/// Write `content` for `field` under `<root>/<locale>/`, creating the
/// locale directory as needed.
pub fn write_field(
    root: &Path,
    locale: &Locale,
    field: MetadataField,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let path = field_path(root, locale, field);
    write_field_with_tmp(&path, field, content, dry_run, &tmp_path(&path))
}

fn write_field_with_tmp(
    path: &Path,
    field: MetadataField,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(existing) if existing == content => {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        // Unreadable or non-UTF-8: fall through and let the write decide.
        Err(e) => tracing::debug!("cannot compare {}: {e}", path.display()),
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_err(field, parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| write_err(field, tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(write_err(field, path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// read_field
// ---------------------------------------------------------------------------

/// Strip exactly one trailing line terminator (`\r\n`, `\n` or `\r`).
pub fn chomp(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .or_else(|| content.strip_suffix('\r'))
        .unwrap_or(content)
}

/// Read `field` from `<root>/<locale>/`, minus one trailing line terminator.
pub fn read_field(root: &Path, locale: &Locale, field: MetadataField) -> Result<String, SyncError> {
    let path = field_path(root, locale, field);
    let content = std::fs::read_to_string(&path).map_err(|e| read_err(field, &path, e))?;
    tracing::debug!("read: {}", path.display());
    Ok(chomp(&content).to_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
