//! Session state types.

use eventmarketplace_api::{BearerToken, Role, User};
use serde::{Deserialize, Serialize};

/// Identity as reported by the identity provider.
///
/// Only used to obtain bearer tokens; the backend [`User`] is the canonical
/// record. Provider credentials never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Provider uid, also the backend user id.
    pub uid: String,

    /// Email the identity signed in with, if the provider reports one.
    pub email: Option<String>,
}

impl IdentityRecord {
    /// Create an identity record.
    #[must_use]
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }
}

/// Who is signed in, and whether the backend has confirmed it.
///
/// A token without a user means verification is pending. A user is never
/// held without a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Backend user confirmed by the last successful verification or login.
    pub user: Option<User>,

    /// Current provider identity.
    pub identity: Option<IdentityRecord>,

    /// Bearer token mirrored in durable storage.
    pub token: Option<BearerToken>,

    /// `true` until the first verification settles. Never set again.
    pub loading: bool,
}

impl SessionState {
    /// State at startup, seeded with the token found in durable storage.
    #[must_use]
    pub const fn restoring(token: Option<BearerToken>) -> Self {
        Self {
            user: None,
            identity: None,
            token,
            loading: true,
        }
    }

    /// Whether `token` is the token currently held.
    #[must_use]
    pub fn holds(&self, token: &BearerToken) -> bool {
        self.token.as_ref() == Some(token)
    }

    /// Whether the current identity has `uid`.
    #[must_use]
    pub fn identity_is(&self, uid: &str) -> bool {
        self.identity.as_ref().is_some_and(|identity| identity.uid == uid)
    }

    /// Role of the signed-in user.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// Read-only projection for consumers.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            user: self.user.clone(),
            token: self.token.clone(),
            loading: self.loading,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::restoring(None)
    }
}

/// What the presentation layer sees of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Signed-in user.
    pub user: Option<User>,
    /// Bearer token for backend calls.
    pub token: Option<BearerToken>,
    /// Initial verification still running.
    pub loading: bool,
}

impl SessionView {
    /// Whether a verified user is signed in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

impl From<&SessionState> for SessionView {
    fn from(state: &SessionState) -> Self {
        state.view()
    }
}
