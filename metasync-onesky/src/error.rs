//! Error types for metasync-onesky.

use thiserror::Error;

/// Failures talking to the OneSky platform API.
#[derive(Debug, Error)]
pub enum OneSkyError {
    /// The API answered with a non-success status.
    #[error("OneSky API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, DNS, TLS or timeout failure.
    #[error("OneSky request failed: {0}")]
    Transport(#[source] Box<ureq::Transport>),

    /// The response body could not be read.
    #[error("failed to read OneSky response: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for OneSkyError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => OneSkyError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => OneSkyError::Transport(Box::new(transport)),
        }
    }
}
