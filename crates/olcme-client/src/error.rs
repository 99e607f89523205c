//! API error types.

use thiserror::Error;

/// Errors from calls to the survey backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    ///
    /// Displays only `message`: the response body text, or `HTTP <status>`
    /// when the body was empty.
    #[error("{message}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body or status fallback.
        message: String,
    },

    /// A success body could not be decoded into the expected type.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
