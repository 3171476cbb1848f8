//! Session client.
//!
//! [`SessionClient`] owns the session store for the lifetime of the
//! application: it restores the persisted token, forwards identity provider
//! notifications into the store, and exposes the operations the
//! presentation layer needs (sign-in, logout, profile maintenance) plus an
//! observer for the session view.

use crate::actions::SessionAction;
use crate::config::ClientConfig;
use crate::environment::SessionEnvironment;
use crate::error::{Result, SessionError};
use crate::guard::GuardDecision;
use crate::providers::{BackendVerifier, IdentityProvider, ToolkitIdentityProvider};
use crate::reducer::SessionReducer;
use crate::routes::{Route, landing_route};
use crate::state::{SessionState, SessionView};
use crate::storage::FileStorage;
use eventmarketplace_api::{
    BearerToken, MarketplaceClient, ProfilePicture, ProfileUpdate, RegisterRequest, User,
};
use eventmarketplace_core::storage::KeyValueStorage;
use eventmarketplace_runtime::{Store, StoreError};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Storage key of the identity provider's own credentials.
pub const IDENTITY_CREDENTIALS_KEY: &str = "identityCredentials";

type SessionStore<I, V> =
    Store<SessionState, SessionAction, SessionEnvironment<I, V>, SessionReducer<I, V>>;

/// The running client session.
///
/// Create with [`SessionClient::bootstrap`], end with
/// [`SessionClient::teardown`]. Dropping the client stops the identity
/// subscription but does not wait for in-flight work.
pub struct SessionClient<I, V>
where
    I: IdentityProvider + Clone + 'static,
    V: BackendVerifier + Clone + 'static,
{
    store: SessionStore<I, V>,
    environment: SessionEnvironment<I, V>,
    api: MarketplaceClient,
    subscription: Option<JoinHandle<()>>,
}

impl SessionClient<ToolkitIdentityProvider, MarketplaceClient> {
    /// Bootstrap a client wired to the identity toolkit and the marketplace
    /// backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the store
    /// rejects the bootstrap.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let api = MarketplaceClient::with_timeout(
            config.api_url.clone(),
            config.session.request_timeout,
        )?;

        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::new(&config.storage_path));
        let http_client = reqwest::Client::builder()
            .timeout(config.session.request_timeout)
            .build()
            .map_err(|e| SessionError::Config(e.to_string()))?;
        let identity = ToolkitIdentityProvider::new(config.identity.clone())
            .with_http_client(http_client)
            .with_persistence(Arc::clone(&storage), IDENTITY_CREDENTIALS_KEY);

        let environment =
            SessionEnvironment::new(identity, api.clone(), storage, config.session.clone());
        Self::bootstrap(environment, api).await
    }
}

impl<I, V> SessionClient<I, V>
where
    I: IdentityProvider + Clone + 'static,
    V: BackendVerifier + Clone + 'static,
{
    /// Start the session.
    ///
    /// Restores the persisted token, starts its verification, applies the
    /// provider's current identity and keeps forwarding identity changes
    /// until [`teardown`](Self::teardown).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the bootstrap action.
    #[tracing::instrument(skip_all, name = "session_bootstrap")]
    pub async fn bootstrap(
        environment: SessionEnvironment<I, V>,
        api: MarketplaceClient,
    ) -> Result<Self> {
        let restored = match environment.storage.get(environment.token_key()) {
            Ok(token) => token.map(BearerToken::new),
            Err(error) => {
                tracing::warn!(error = %error, "Could not read persisted token, starting signed out");
                None
            },
        };
        tracing::debug!(restored = restored.is_some(), "Bootstrapping session");

        let store = Store::new(
            SessionState::restoring(restored),
            SessionReducer::new(),
            environment.clone(),
        );
        store.send(SessionAction::Bootstrap).await?;

        // The provider's current identity is applied before returning, so
        // callers never race the initial notification.
        let mut identities = environment.identity.subscribe();
        if let Some(initial) = identities.next().await {
            store.send(SessionAction::IdentityChanged(initial)).await?;
        }

        let forwarder = store.clone();
        let subscription = tokio::spawn(async move {
            while let Some(identity) = identities.next().await {
                if let Err(error) = forwarder.send(SessionAction::IdentityChanged(identity)).await {
                    tracing::debug!(error = %error, "Session store closed, ending identity subscription");
                    break;
                }
            }
        });

        Ok(Self {
            store,
            environment,
            api,
            subscription: Some(subscription),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Observation
    // ═══════════════════════════════════════════════════════════════════════

    /// Current session view.
    #[must_use]
    pub fn view(&self) -> SessionView {
        self.store.observe().borrow().view()
    }

    /// Observer notified after every session transition.
    #[must_use]
    pub fn watch(&self) -> SessionWatch {
        SessionWatch {
            receiver: self.store.observe(),
        }
    }

    /// Every action produced by session effects (token and verification
    /// results, logout outcomes).
    #[must_use]
    pub fn actions(&self) -> broadcast::Receiver<SessionAction> {
        self.store.subscribe_actions()
    }

    /// Wait until the initial verification has settled.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if it does not settle within the
    /// request timeout.
    pub async fn ready(&self) -> Result<SessionView> {
        self.wait_for(|view| !view.loading).await
    }

    /// Wait until the session view satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] on timeout or if the store is gone.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Result<SessionView>
    where
        F: FnMut(&SessionView) -> bool,
    {
        let mut receiver = self.store.observe();
        let wait = receiver.wait_for(|state| predicate(&state.view()));
        match tokio::time::timeout(self.environment.config.request_timeout, wait).await {
            Ok(Ok(state)) => Ok(state.view()),
            Ok(Err(_)) => Err(StoreError::ChannelClosed.into()),
            Err(_) => Err(StoreError::Timeout.into()),
        }
    }

    /// Evaluate the route guard for `route` against the current session.
    #[must_use]
    pub fn guard(&self, route: &Route) -> GuardDecision {
        route.decide(&self.view())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Session operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Install a session for `user` with `token`, without verification.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the client is shutting down.
    pub async fn login(&self, token: BearerToken, user: User) -> Result<()> {
        self.store.send(SessionAction::Login { token, user }).await?;
        Ok(())
    }

    /// End the identity provider session, then the local one.
    ///
    /// # Errors
    ///
    /// A provider failure is returned and leaves the session untouched.
    #[tracing::instrument(skip(self), name = "session_logout")]
    pub async fn logout(&self) -> Result<()> {
        let outcome = self
            .store
            .send_and_wait_for(
                SessionAction::Logout,
                SessionAction::is_logout_outcome,
                self.environment.config.request_timeout,
            )
            .await?;

        match outcome {
            SessionAction::LogoutFailed { reason } => Err(SessionError::Identity(reason)),
            _ => {
                metrics::counter!("session.logouts").increment(1);
                Ok(())
            },
        }
    }

    /// Replace the cached user. Ignored when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the client is shutting down.
    pub async fn update_user(&self, user: User) -> Result<()> {
        self.store.send(SessionAction::UpdateUser(user)).await?;
        Ok(())
    }

    /// Sign in with email and password.
    ///
    /// Returns the verified user and the route their role lands on.
    ///
    /// # Errors
    ///
    /// Provider and verification errors are returned unchanged.
    #[tracing::instrument(skip(self, password), name = "session_sign_in")]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(User, Route)> {
        let identity = self.environment.identity.sign_in(email, password).await?;
        let token = self.environment.identity.get_token(&identity).await?;
        let user = self.environment.verifier.verify(&token).await?;

        self.login(token, user.clone()).await?;
        metrics::counter!("session.sign_ins").increment(1);

        let landing = landing_route(user.role);
        tracing::info!(user_id = %user.id, landing = %landing, "Signed in");
        Ok((user, landing))
    }

    /// Register a backend account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Backend errors are returned unchanged.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        Ok(self.api.register(request).await?)
    }

    /// Send a password reset email.
    ///
    /// # Errors
    ///
    /// Provider errors are returned unchanged.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        self.environment.identity.request_password_reset(email).await
    }

    /// Change the password of the current identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] without an identity; provider
    /// errors are returned unchanged.
    pub async fn change_password(&self, new_password: &str) -> Result<()> {
        let identity = self
            .store
            .state(|state| state.identity.clone())
            .await
            .ok_or(SessionError::NotSignedIn)?;
        self.environment
            .identity
            .change_password(&identity, new_password)
            .await
    }

    /// Update the signed-in user's profile, optionally with a new picture.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] without a user; backend errors
    /// are returned unchanged.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        picture: Option<ProfilePicture>,
    ) -> Result<User> {
        let (uid, _) = self.current_user().await?;
        let user = self.api.update_profile(&uid, update, picture).await?;
        self.update_user(user.clone()).await?;
        Ok(user)
    }

    /// Remove the signed-in user's profile picture.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] without a user; backend errors
    /// are returned unchanged.
    pub async fn delete_profile_picture(&self) -> Result<User> {
        let (uid, token) = self.current_user().await?;
        let user = self.api.delete_profile_picture(&uid, token.as_ref()).await?;
        self.update_user(user.clone()).await?;
        Ok(user)
    }

    /// Delete the signed-in user's account, then log out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] without a user; backend and
    /// logout errors are returned unchanged.
    pub async fn delete_account(&self) -> Result<()> {
        let (uid, _) = self.current_user().await?;
        let message = self.api.delete_account(&uid).await?;
        tracing::info!(user_id = %uid, message = %message, "Account deleted");
        self.logout().await
    }

    async fn current_user(&self) -> Result<(String, Option<BearerToken>)> {
        self.store
            .state(|state| {
                state
                    .user
                    .as_ref()
                    .map(|user| (user.id.clone(), state.token.clone()))
            })
            .await
            .ok_or(SessionError::NotSignedIn)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    /// Stop the identity subscription and shut the store down.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if in-flight effects outlive the
    /// shutdown timeout.
    pub async fn teardown(mut self) -> Result<()> {
        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
        self.store
            .shutdown(self.environment.config.shutdown_timeout)
            .await?;
        tracing::debug!("Session torn down");
        Ok(())
    }
}

impl<I, V> Drop for SessionClient<I, V>
where
    I: IdentityProvider + Clone + 'static,
    V: BackendVerifier + Clone + 'static,
{
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
    }
}

/// Observer of session views.
#[derive(Debug, Clone)]
pub struct SessionWatch {
    receiver: watch::Receiver<SessionState>,
}

impl SessionWatch {
    /// Latest view, marking it seen.
    #[must_use]
    pub fn current(&mut self) -> SessionView {
        self.receiver.borrow_and_update().view()
    }

    /// Wait for the next transition and return the new view.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] once the session is gone.
    pub async fn changed(&mut self) -> Result<SessionView> {
        self.receiver
            .changed()
            .await
            .map_err(|_| SessionError::from(StoreError::ChannelClosed))?;
        Ok(self.current())
    }
}
