//! Remote page retrieval errors.

use thiserror::Error;

use super::ErrorKind;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} timed out after {seconds} seconds")]
    Timeout { url: String, seconds: u64 },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} did not return HTML (content type: {content_type})")]
    NotHtml { url: String, content_type: String },

    #[error("Failed to read body from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotHtml { .. } | Self::Body { .. } => ErrorKind::Content,
            _ => ErrorKind::Network,
        }
    }

    /// Name of the caller input responsible for the failure, if any.
    pub fn input(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUrl { .. } | Self::UnsupportedScheme(_) => Some("url"),
            _ => None,
        }
    }
}
