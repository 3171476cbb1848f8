//! Error types for the marketplace REST client

use thiserror::Error;

/// Errors that can occur when talking to the marketplace backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP request failed (connection refused, timeout, TLS, ...)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// The backend rejected the bearer token
    #[error("Unauthorized - invalid or expired token")]
    Unauthorized,

    /// Backend returned a non-success status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, usually the backend's error message
        message: String,
    },

    /// The client could not be built from the given settings
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// HTTP status carried by this error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}
