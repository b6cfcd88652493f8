//! Error types for backend calls and reset runs.

use thiserror::Error;

/// Failure talking to the Supabase REST or Storage API.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("API key is not a valid HTTP header value")]
    InvalidApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Anything other than 200 or 204.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    /// HTTP status for [`BackendError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A reset run that stopped before finishing.
#[derive(Error, Debug)]
pub enum ResetError {
    /// A required step was rejected; later steps were not attempted.
    #[error("{action} {target} failed: {source}")]
    Fatal {
        action: &'static str,
        target: String,
        #[source]
        source: BackendError,
    },

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
