//! Error types for metasync-sync.

use std::path::PathBuf;

use thiserror::Error;

use metasync_core::{MetadataError, MetadataField};

/// All errors that abort a download or upload pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A field file could not be read.
    #[error("problem reading app {field} at path '{}': {source}", path.display())]
    Read {
        field: MetadataField,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field file or its locale directory could not be written.
    #[error("problem writing app {field} at path '{}': {source}", path.display())]
    Write {
        field: MetadataField,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exported document could not be converted.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The assembled document could not be encoded for upload.
    #[error("failed to encode metadata document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Opaque failure from the platform connection, passed through as-is.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Convenience constructor for [`SyncError::Read`].
pub(crate) fn read_err(
    field: MetadataField,
    path: impl Into<PathBuf>,
    source: std::io::Error,
) -> SyncError {
    SyncError::Read {
        field,
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`SyncError::Write`].
pub(crate) fn write_err(
    field: MetadataField,
    path: impl Into<PathBuf>,
    source: std::io::Error,
) -> SyncError {
    SyncError::Write {
        field,
        path: path.into(),
        source,
    }
}
