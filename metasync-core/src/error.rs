//! Error types for metasync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while converting between remote and local metadata shapes.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The export response was non-empty but not a well-formed document.
    #[error("failed to parse remote metadata: {0}")]
    Parse(#[from] serde_json::Error),

    /// A recognized field carried a value of the wrong shape
    /// (e.g. a keyword map where text was expected).
    #[error("remote field {key} has an unexpected shape")]
    FieldShape { key: String },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no public key for OneSky given; pass --public-key or set ONESKY_PUBLIC_KEY")]
    MissingPublicKey,

    #[error("no secret key for OneSky given; pass --secret-key or set ONESKY_SECRET_KEY")]
    MissingSecretKey,

    #[error("no project id given; pass --project-id or set ONESKY_ITUNES_PROJECT_ID")]
    MissingProjectId,

    #[error("couldn't find metadata directory at path '{}'", path.display())]
    MetadataPathNotFound { path: PathBuf },

    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and serde_yaml context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
