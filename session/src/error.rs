//! Error types for session operations.

use eventmarketplace_api::ApiError;
use eventmarketplace_core::storage::StorageError;
use eventmarketplace_runtime::StoreError;
use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced to callers of the session client.
///
/// Failures on the passive path (token refresh, verification of a restored
/// token) never reach callers; they end the session instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    // ═══════════════════════════════════════════════════════════
    // Identity Provider Errors
    // ═══════════════════════════════════════════════════════════

    /// Email/password pair rejected by the identity provider.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The identity provider refused or failed an operation.
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// Operation needs a signed-in identity and there is none.
    #[error("Not signed in")]
    NotSignedIn,

    // ═══════════════════════════════════════════════════════════
    // Backend Errors
    // ═══════════════════════════════════════════════════════════

    /// The marketplace backend rejected or failed a request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend accepted the token but has no user record for it.
    #[error("No backend user for this token")]
    UnknownUser,

    // ═══════════════════════════════════════════════════════════
    // Infrastructure Errors
    // ═══════════════════════════════════════════════════════════

    /// Durable storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The session store rejected an action or timed out.
    #[error("Session store error: {0}")]
    Store(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for SessionError {
    fn from(error: StoreError) -> Self {
        Self::Store(error.to_string())
    }
}

impl SessionError {
    /// Whether the error means the bearer token is no longer accepted.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}
