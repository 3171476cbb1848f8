//! Session actions.
//!
//! Commands come from the session client; the remaining variants are
//! results fed back by effects or forwarded from the identity provider.

use crate::state::IdentityRecord;
use eventmarketplace_api::{BearerToken, User};

/// Everything the session reducer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Commands
    // ═══════════════════════════════════════════════════════════════════════

    /// Verify the token restored from durable storage, once at startup.
    Bootstrap,

    /// Install a session directly, without verification.
    Login {
        /// Bearer token to hold and persist.
        token: BearerToken,
        /// Backend user the token belongs to.
        user: User,
    },

    /// End the provider session, then clear the local one.
    Logout,

    /// Replace the cached user (e.g. after a profile edit).
    UpdateUser(User),

    // ═══════════════════════════════════════════════════════════════════════
    // Identity provider notifications
    // ═══════════════════════════════════════════════════════════════════════

    /// The provider's signed-in identity changed.
    IdentityChanged(Option<IdentityRecord>),

    // ═══════════════════════════════════════════════════════════════════════
    // Effect results
    // ═══════════════════════════════════════════════════════════════════════

    /// The provider issued a token for identity `uid`.
    TokenIssued {
        /// Identity the token was requested for.
        uid: String,
        /// Fresh bearer token.
        token: BearerToken,
    },

    /// The provider could not issue a token for identity `uid`.
    TokenRequestFailed {
        /// Identity the token was requested for.
        uid: String,
        /// Provider error.
        reason: String,
    },

    /// The backend accepted `token`.
    VerificationSucceeded {
        /// Token that was verified.
        token: BearerToken,
        /// Backend user it belongs to.
        user: User,
    },

    /// The backend rejected `token`, or could not be reached.
    VerificationFailed {
        /// Token that was verified.
        token: BearerToken,
        /// Error description.
        reason: String,
    },

    /// The provider session ended.
    LoggedOut,

    /// The provider refused to end its session.
    LogoutFailed {
        /// Provider error.
        reason: String,
    },
}

impl SessionAction {
    /// Whether this action concludes a [`SessionAction::Logout`].
    #[must_use]
    pub const fn is_logout_outcome(&self) -> bool {
        matches!(self, Self::LoggedOut | Self::LogoutFailed { .. })
    }

    /// Short name for logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::UpdateUser(_) => "update_user",
            Self::IdentityChanged(_) => "identity_changed",
            Self::TokenIssued { .. } => "token_issued",
            Self::TokenRequestFailed { .. } => "token_request_failed",
            Self::VerificationSucceeded { .. } => "verification_succeeded",
            Self::VerificationFailed { .. } => "verification_failed",
            Self::LoggedOut => "logged_out",
            Self::LogoutFailed { .. } => "logout_failed",
        }
    }
}
