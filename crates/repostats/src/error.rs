//! Failure taxonomy for aggregation runs.

use thiserror::Error;

/// Errors that can end an aggregation run.
///
/// The three variants are deliberately distinct outcomes for callers:
/// an unresolvable account, a failed repository-listing fetch mid-run, and
/// everything transport-shaped. A failed language fetch for a single
/// repository is not represented here because it never aborts a run.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The account could not be resolved. Carries the remote's reported
    /// status and message verbatim.
    #[error("account not found ({status}): {message}")]
    NotFound { status: u16, message: String },

    /// A repository-listing page fetch returned a non-success status.
    /// Aborts the run; no partial result is produced.
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Unexpected failure unrelated to a specific remote status, e.g. a
    /// transport-level fault or malformed response body.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl StatsError {
    /// Create a not-found error.
    #[inline]
    pub fn not_found(status: u16, message: impl Into<String>) -> Self {
        Self::NotFound {
            status,
            message: message.into(),
        }
    }

    /// Create an upstream error.
    #[inline]
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The remote status code associated with this error, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. } | Self::Upstream { status, .. } => Some(*status),
            Self::Internal { .. } => None,
        }
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, StatsError>;
