//! Session environment.
//!
//! Collaborators injected into the session reducer.

use crate::config::SessionConfig;
use crate::providers::{BackendVerifier, IdentityProvider};
use eventmarketplace_core::storage::KeyValueStorage;
use std::sync::Arc;

/// Session environment.
///
/// # Type Parameters
///
/// - `I`: Identity provider
/// - `V`: Backend verifier
#[derive(Clone)]
pub struct SessionEnvironment<I, V>
where
    I: IdentityProvider + Clone,
    V: BackendVerifier + Clone,
{
    /// Identity provider (token issuance, sign-out).
    pub identity: I,

    /// Backend verifier (token → user).
    pub verifier: V,

    /// Durable storage for the bearer token.
    pub storage: Arc<dyn KeyValueStorage>,

    /// Session settings.
    pub config: SessionConfig,
}

impl<I, V> SessionEnvironment<I, V>
where
    I: IdentityProvider + Clone,
    V: BackendVerifier + Clone,
{
    /// Create a new session environment.
    #[must_use]
    pub fn new(
        identity: I,
        verifier: V,
        storage: Arc<dyn KeyValueStorage>,
        config: SessionConfig,
    ) -> Self {
        Self {
            identity,
            verifier,
            storage,
            config,
        }
    }

    /// Durable storage key of the bearer token.
    #[must_use]
    pub fn token_key(&self) -> &str {
        &self.config.token_key
    }
}
