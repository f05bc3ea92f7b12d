//! Collaborator interface for the remote translation platform.
//!
//! The sync pipeline only depends on [`Connection`]; the concrete HTTP client
//! lives in `metasync-onesky`. Tests substitute an in-memory fake.

use std::fmt;

use crate::types::{Locale, ProjectId};

/// Name the assembled document is submitted under.
pub const UPLOAD_FILE_NAME: &str = "AppDescription.json";

/// File format tag passed through to the platform, never interpreted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    HierarchicalJson,
}

impl FileFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::HierarchicalJson => "HIERARCHICAL_JSON",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the platform needs to accept an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<'a> {
    pub project_id: &'a ProjectId,
    pub locale: &'a Locale,
    pub file_name: &'a str,
    pub format: FileFormat,
    /// Serialized document body.
    pub content: &'a str,
    pub skip_if_in_translation: bool,
    pub deprecate_missing: bool,
}

/// How the platform handled a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Not sent because the document is currently being translated.
    SkippedInTranslation,
}

/// A handle on the remote translation project.
pub trait Connection {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Raw exported document for `locale`; an empty string means nothing
    /// has been translated for it.
    fn export(&self, project_id: &ProjectId, locale: &Locale) -> Result<String, Self::Error>;

    fn submit(&self, submission: &Submission<'_>) -> Result<SubmitOutcome, Self::Error>;
}
