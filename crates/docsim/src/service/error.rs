//! Comparison service error types.

use thiserror::Error;

/// Errors from the comparison service boundary.
///
/// Transport failures, HTTP-level failures, and structured rejections are
/// all normalised here so the run controller handles a single error type
/// regardless of cause.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network failure, timeout, or other transport problem.
    #[error("Comparison service request failed: {0}")]
    Transport(String),

    /// Non-2xx response with no structured body.
    #[error("Comparison service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A request or response outside the service contract.
    #[error("Comparison service returned a malformed response: {0}")]
    Malformed(String),

    /// A document was submitted before its content finished loading.
    #[error("Document '{name}' has not finished loading")]
    PayloadNotReady { name: String },

    /// The service processed the request and reported a failure.
    ///
    /// Display is the service message verbatim; it becomes the run's
    /// terminal error.
    #[error("{message}")]
    Rejected { message: String },
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
