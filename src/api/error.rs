//! API Error Types
//!
//! Errors raised while talking to the hot-word backend.

use thiserror::Error;

/// Backend client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend could not be reached
    #[error("Backend unavailable")]
    Unavailable,

    /// Request exceeded the client timeout
    #[error("Request timeout")]
    Timeout,

    /// Transport or decoding failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body carried `success: false`
    #[error("Backend error: {0}")]
    Backend(String),

    /// Invalid base URL or request construction
    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Classify a reqwest failure the way the dashboard reports it
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(err)
        }
    }
}

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;
