//! # metasync-sync
//!
//! Locale field store and the download / upload passes.
//!
//! Call [`download`] to materialize one locale's translated metadata as
//! field files, or [`upload`] to read those files back and submit them.

pub mod error;
pub mod pipeline;
pub mod store;

pub use error::SyncError;
pub use pipeline::{
    download, read_locale, upload, DownloadReport, DownloadRequest, UploadReport, UploadRequest,
    UploadStatus,
};
pub use store::{read_field, write_field, WriteResult};
