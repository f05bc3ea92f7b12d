//! metasync core library — domain types, keyword fitting, document assembly.
//!
//! - [`types`] — locale newtypes, [`MetadataField`], [`MetadataDocument`]
//! - [`keywords`] — [`fit_keywords`] and the 100-character budget
//! - [`assembler`] — remote ⇄ local conversions
//! - [`transport`] — the [`Connection`] collaborator trait
//! - [`config`] — layered YAML/CLI configuration
//! - [`error`] — [`MetadataError`], [`ConfigError`]

pub mod assembler;
pub mod config;
pub mod error;
pub mod keywords;
pub mod transport;
pub mod types;
pub mod warning;

pub use assembler::{local_to_remote, remote_to_local, LocaleFieldSet, RemotePayload};
pub use config::{ConfigFile, Credentials, SyncConfig};
pub use error::{ConfigError, MetadataError};
pub use keywords::{fit_keywords, DroppedKeyword, FittedKeywords, KEYWORD_BUDGET};
pub use transport::{Connection, FileFormat, Submission, SubmitOutcome, UPLOAD_FILE_NAME};
pub use types::{
    ExportEnvelope, FieldValue, Locale, LocaleMapping, MetadataDocument, MetadataField, ProjectId,
};
pub use warning::SyncWarning;
