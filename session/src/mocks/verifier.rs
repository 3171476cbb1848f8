//! Mock backend verifier.

use super::lock;
use crate::error::{Result, SessionError};
use crate::providers::BackendVerifier;
use eventmarketplace_api::{ApiError, BearerToken, User};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory backend verifier.
///
/// Known tokens verify to their user; unknown tokens are rejected as
/// unauthorized. Every call is counted.
#[derive(Debug, Clone, Default)]
pub struct MockVerifier {
    users: Arc<Mutex<HashMap<BearerToken, User>>>,
    calls: Arc<AtomicUsize>,
    unreachable: Arc<AtomicBool>,
}

impl MockVerifier {
    /// Create a verifier that knows no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as belonging to `user`.
    #[must_use]
    pub fn with_user(self, token: &str, user: User) -> Self {
        self.insert(token, user);
        self
    }

    /// Simulate a backend that cannot be reached.
    #[must_use]
    pub fn unreachable(self) -> Self {
        self.unreachable.store(true, Ordering::SeqCst);
        self
    }

    /// Accept `token` as belonging to `user` from now on.
    pub fn insert(&self, token: &str, user: User) {
        lock(&self.users).insert(BearerToken::new(token), user);
    }

    /// Number of `verify` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BackendVerifier for MockVerifier {
    fn verify(&self, token: &BearerToken) -> impl Future<Output = Result<User>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let result = if self.unreachable.load(Ordering::SeqCst) {
            Err(SessionError::Api(ApiError::RequestFailed(
                "connection refused".to_string(),
            )))
        } else {
            lock(&self.users)
                .get(token)
                .cloned()
                .ok_or(SessionError::Api(ApiError::Unauthorized))
        };

        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmarketplace_api::Role;

    #[tokio::test]
    async fn test_known_and_unknown_tokens() {
        let verifier = MockVerifier::new().with_user("abc", User::new("u1", Role::User));

        let user = verifier.verify(&BearerToken::new("abc")).await;
        assert_eq!(user.map(|u| u.id), Ok("u1".to_string()));

        let rejected = verifier.verify(&BearerToken::new("zzz")).await;
        assert!(rejected.is_err_and(|e| e.is_unauthorized()));

        assert_eq!(verifier.calls(), 2);
    }

    #[test]
    fn test_unreachable_backend_is_not_unauthorized() {
        let verifier = MockVerifier::new()
            .with_user("abc", User::new("u1", Role::User))
            .unreachable();

        let result = tokio_test::block_on(verifier.verify(&BearerToken::new("abc")));

        assert!(result.is_err_and(|e| !e.is_unauthorized()));
        assert_eq!(verifier.calls(), 1);
    }
}
