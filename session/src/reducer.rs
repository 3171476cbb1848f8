//! Session reducer.
//!
//! Owns every transition of [`SessionState`]. Network calls (token requests,
//! verification, sign-out) are returned as future effects whose results come
//! back as actions; token persistence is returned as storage effects, which
//! the store applies before the state change becomes visible.
//!
//! # Ordering
//!
//! Verification results carry the token they verified and token results
//! carry the identity they were requested for. A result whose tag no longer
//! matches the state is dropped, so a slow answer for an old token can never
//! overwrite the outcome for a newer one.

use crate::actions::SessionAction;
use crate::environment::SessionEnvironment;
use crate::providers::{BackendVerifier, IdentityProvider};
use crate::state::SessionState;
use eventmarketplace_api::BearerToken;
use eventmarketplace_core::effect::Effect;
use eventmarketplace_core::reducer::Reducer;
use eventmarketplace_core::{SmallVec, async_effect, remove_value, smallvec, store_value};

/// Reducer for the client session.
#[derive(Debug, Clone)]
pub struct SessionReducer<I, V> {
    /// Phantom data to hold type parameters.
    _phantom: std::marker::PhantomData<(I, V)>,
}

impl<I, V> SessionReducer<I, V> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<I, V> Default for SessionReducer<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, V> SessionReducer<I, V>
where
    I: IdentityProvider + Clone + 'static,
    V: BackendVerifier + Clone + 'static,
{
    /// Ask the backend who `token` belongs to.
    fn verify(env: &SessionEnvironment<I, V>, token: BearerToken) -> Effect<SessionAction> {
        let verifier = env.verifier.clone();
        async_effect! {
            match verifier.verify(&token).await {
                Ok(user) => Some(SessionAction::VerificationSucceeded { token, user }),
                Err(error) => Some(SessionAction::VerificationFailed {
                    token,
                    reason: error.to_string(),
                }),
            }
        }
    }

    /// Drop token and user, and the persisted token with them.
    fn end_local_session(
        state: &mut SessionState,
        env: &SessionEnvironment<I, V>,
    ) -> SmallVec<[Effect<SessionAction>; 4]> {
        state.clear();
        state.loading = false;
        smallvec![remove_value! {
            storage: env.storage,
            key: env.token_key()
        }]
    }
}

impl<I, V> Reducer for SessionReducer<I, V>
where
    I: IdentityProvider + Clone + 'static,
    V: BackendVerifier + Clone + 'static,
{
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment<I, V>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        metrics::counter!("session.actions.total", "action" => action.name()).increment(1);

        match action {
            // ═══════════════════════════════════════════════════════════════
            // Bootstrap: verify the restored token
            // ═══════════════════════════════════════════════════════════════
            SessionAction::Bootstrap => match state.token.clone() {
                Some(token) => {
                    tracing::debug!(token = ?token, "Verifying restored token");
                    smallvec![Self::verify(env, token)]
                },
                None => {
                    tracing::debug!("No restored token");
                    state.loading = false;
                    smallvec![Effect::None]
                },
            },

            // ═══════════════════════════════════════════════════════════════
            // IdentityChanged: request a token, or end the session
            // ═══════════════════════════════════════════════════════════════
            SessionAction::IdentityChanged(Some(identity)) => {
                tracing::debug!(uid = %identity.uid, "Identity signed in");
                state.identity = Some(identity.clone());

                let provider = env.identity.clone();
                smallvec![async_effect! {
                    let uid = identity.uid.clone();
                    match provider.get_token(&identity).await {
                        Ok(token) => Some(SessionAction::TokenIssued { uid, token }),
                        Err(error) => Some(SessionAction::TokenRequestFailed {
                            uid,
                            reason: error.to_string(),
                        }),
                    }
                }]
            },

            SessionAction::IdentityChanged(None) => {
                tracing::debug!("Identity signed out");
                state.identity = None;
                Self::end_local_session(state, env)
            },

            // ═══════════════════════════════════════════════════════════════
            // TokenIssued: persist and verify a new token
            // ═══════════════════════════════════════════════════════════════
            SessionAction::TokenIssued { uid, token } => {
                if !state.identity_is(&uid) {
                    tracing::debug!(uid = %uid, "Discarding token for a previous identity");
                    return smallvec![Effect::None];
                }

                if state.holds(&token) {
                    return smallvec![Effect::None];
                }

                tracing::debug!(uid = %uid, token = ?token, "Token issued");
                state.token = Some(token.clone());

                smallvec![
                    store_value! {
                        storage: env.storage,
                        key: env.token_key(),
                        value: token.as_str()
                    },
                    Self::verify(env, token),
                ]
            },

            SessionAction::TokenRequestFailed { uid, reason } => {
                if !state.identity_is(&uid) {
                    tracing::debug!(uid = %uid, "Discarding token failure for a previous identity");
                    return smallvec![Effect::None];
                }

                tracing::warn!(uid = %uid, reason = %reason, "Token request failed, ending session");
                Self::end_local_session(state, env)
            },

            // ═══════════════════════════════════════════════════════════════
            // Verification results
            // ═══════════════════════════════════════════════════════════════
            SessionAction::VerificationSucceeded { token, user } => {
                if !state.holds(&token) {
                    tracing::debug!(token = ?token, "Discarding verification of a replaced token");
                    return smallvec![Effect::None];
                }

                tracing::info!(user_id = %user.id, role = %user.role, "Session verified");
                metrics::counter!("session.verifications", "outcome" => "accepted").increment(1);
                state.user = Some(user);
                state.loading = false;
                smallvec![Effect::None]
            },

            SessionAction::VerificationFailed { token, reason } => {
                if !state.holds(&token) {
                    tracing::debug!(token = ?token, "Discarding verification of a replaced token");
                    return smallvec![Effect::None];
                }

                tracing::warn!(reason = %reason, "Token verification failed, ending session");
                metrics::counter!("session.verifications", "outcome" => "rejected").increment(1);
                Self::end_local_session(state, env)
            },

            // ═══════════════════════════════════════════════════════════════
            // Login: install a session without verification
            // ═══════════════════════════════════════════════════════════════
            SessionAction::Login { token, user } => {
                tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
                state.token = Some(token.clone());
                state.user = Some(user);
                state.loading = false;

                smallvec![store_value! {
                    storage: env.storage,
                    key: env.token_key(),
                    value: token.as_str()
                }]
            },

            // ═══════════════════════════════════════════════════════════════
            // Logout: end the provider session first
            // ═══════════════════════════════════════════════════════════════
            SessionAction::Logout => {
                let provider = env.identity.clone();
                smallvec![async_effect! {
                    match provider.end_session().await {
                        Ok(()) => Some(SessionAction::LoggedOut),
                        Err(error) => Some(SessionAction::LogoutFailed {
                            reason: error.to_string(),
                        }),
                    }
                }]
            },

            SessionAction::LoggedOut => {
                tracing::info!("Logged out");
                Self::end_local_session(state, env)
            },

            SessionAction::LogoutFailed { reason } => {
                tracing::warn!(reason = %reason, "Logout failed, session kept");
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // UpdateUser: replace the cached user
            // ═══════════════════════════════════════════════════════════════
            SessionAction::UpdateUser(user) => {
                if state.token.is_none() {
                    tracing::warn!(user_id = %user.id, "Ignoring user update without a session");
                    return smallvec![Effect::None];
                }

                state.user = Some(user);
                smallvec![Effect::None]
            },
        }
    }
}
