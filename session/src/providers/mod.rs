//! Session providers.
//!
//! Traits for the external collaborators of the session store. The reducer
//! depends on these traits only; applications plug in
//! [`ToolkitIdentityProvider`] and the marketplace REST client, tests plug
//! in the mocks.
//!
//! ```text
//!  IdentityProvider ──subscribe()──▶ IdentityChanged ─┐
//!        ▲                                            ▼
//!        └──── get_token / end_session ◀──── SessionReducer ───▶ KeyValueStorage
//!                                                     │
//!                                                     ▼
//!                                            BackendVerifier::verify
//! ```

use crate::error::{Result, SessionError};
use crate::state::IdentityRecord;
use eventmarketplace_api::{BearerToken, MarketplaceClient, User};
use futures::Stream;
use std::future::Future;
use std::pin::Pin;

pub mod toolkit;

pub use toolkit::ToolkitIdentityProvider;

/// Stream of identity changes.
pub type IdentityStream = Pin<Box<dyn Stream<Item = Option<IdentityRecord>> + Send>>;

/// Managed identity service.
///
/// Issues bearer tokens for a signed-in identity and notifies subscribers
/// on sign-in, sign-out and token refresh.
pub trait IdentityProvider: Send + Sync {
    /// Subscribe to identity changes.
    ///
    /// The stream yields the current identity first, then the identity
    /// again after every sign-in, sign-out or token refresh, so subscribers
    /// know to fetch a new token. It only ends if the provider is dropped.
    fn subscribe(&self) -> IdentityStream;

    /// Fetch a bearer token for `identity`, refreshing it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity is not signed in with this provider
    /// or the token cannot be refreshed.
    fn get_token(
        &self,
        identity: &IdentityRecord,
    ) -> impl Future<Output = Result<BearerToken>> + Send;

    /// End the provider session. Subscribers then observe `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider refuses.
    fn end_session(&self) -> impl Future<Output = Result<()>> + Send;

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` for a wrong pair.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<IdentityRecord>> + Send;

    /// Send a password reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the request.
    fn request_password_reset(&self, email: &str) -> impl Future<Output = Result<()>> + Send;

    /// Change the password of the signed-in `identity`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSignedIn` if `identity` is not the current
    /// provider identity.
    fn change_password(
        &self,
        identity: &IdentityRecord,
        new_password: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Backend endpoint exchanging a bearer token for the canonical user.
pub trait BackendVerifier: Send + Sync {
    /// Verify `token` and return the user it belongs to.
    ///
    /// # Errors
    ///
    /// Any non-success answer or transport failure.
    fn verify(&self, token: &BearerToken) -> impl Future<Output = Result<User>> + Send;
}

impl BackendVerifier for MarketplaceClient {
    async fn verify(&self, token: &BearerToken) -> Result<User> {
        let response = self.verify_token(token).await?;
        response.user.ok_or(SessionError::UnknownUser)
    }
}
