//! Mock identity provider.

use super::lock;
use crate::error::{Result, SessionError};
use crate::providers::{IdentityProvider, IdentityStream};
use crate::state::IdentityRecord;
use eventmarketplace_api::BearerToken;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    identity: IdentityRecord,
}

/// In-memory identity provider.
///
/// Clones share state, so a test can keep a handle to drive identity
/// changes while the session client owns another.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    identity: Arc<watch::Sender<Option<IdentityRecord>>>,
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    tokens: Arc<Mutex<HashMap<String, BearerToken>>>,
    reset_requests: Arc<Mutex<Vec<String>>>,
    fail_tokens: Arc<AtomicBool>,
    fail_end_session: Arc<AtomicBool>,
}

impl MockIdentityProvider {
    /// Create a provider with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            identity: Arc::new(identity),
            accounts: Arc::new(Mutex::new(HashMap::new())),
            tokens: Arc::new(Mutex::new(HashMap::new())),
            reset_requests: Arc::new(Mutex::new(Vec::new())),
            fail_tokens: Arc::new(AtomicBool::new(false)),
            fail_end_session: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a provider where `uid` is already signed in and holds `token`.
    #[must_use]
    pub fn signed_in(uid: &str, token: &str) -> Self {
        let provider = Self::new();
        provider.set_token(uid, token);
        provider.emit(Some(IdentityRecord::new(uid, None)));
        provider
    }

    /// Register an email/password account for `uid` whose token is `token`.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str, uid: &str, token: &str) -> Self {
        lock(&self.accounts).insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                identity: IdentityRecord::new(uid, Some(email.to_string())),
            },
        );
        self.set_token(uid, token);
        self
    }

    /// Make every token request fail.
    #[must_use]
    pub fn failing_tokens(self) -> Self {
        self.fail_tokens.store(true, Ordering::SeqCst);
        self
    }

    /// Make `end_session` fail.
    #[must_use]
    pub fn failing_end_session(self) -> Self {
        self.fail_end_session.store(true, Ordering::SeqCst);
        self
    }

    /// Token returned for `uid` from now on.
    pub fn set_token(&self, uid: &str, token: &str) {
        lock(&self.tokens).insert(uid.to_string(), BearerToken::new(token));
    }

    /// Simulate a token refresh: `uid` gets `token` and subscribers are
    /// notified with the current identity.
    pub fn refresh(&self, uid: &str, token: &str) {
        self.set_token(uid, token);
        let current = self.current_identity();
        self.identity.send_replace(current);
    }

    /// Simulate an identity change notification.
    pub fn emit(&self, identity: Option<IdentityRecord>) {
        self.identity.send_replace(identity);
    }

    /// Current identity.
    #[must_use]
    pub fn current_identity(&self) -> Option<IdentityRecord> {
        self.identity.borrow().clone()
    }

    /// Emails password resets were requested for.
    #[must_use]
    pub fn reset_requests(&self) -> Vec<String> {
        lock(&self.reset_requests).clone()
    }

    /// Current password of the account registered under `email`.
    #[must_use]
    pub fn password_of(&self, email: &str) -> Option<String> {
        lock(&self.accounts)
            .get(email)
            .map(|account| account.password.clone())
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn subscribe(&self) -> IdentityStream {
        let mut rx = self.identity.subscribe();
        Box::pin(async_stream::stream! {
            let current = rx.borrow_and_update().clone();
            yield current;
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                yield next;
            }
        })
    }

    fn get_token(
        &self,
        identity: &IdentityRecord,
    ) -> impl Future<Output = Result<BearerToken>> + Send {
        let result = if self.fail_tokens.load(Ordering::SeqCst) {
            Err(SessionError::Identity("token service unavailable".to_string()))
        } else {
            lock(&self.tokens)
                .get(&identity.uid)
                .cloned()
                .ok_or(SessionError::NotSignedIn)
        };

        async move { result }
    }

    fn end_session(&self) -> impl Future<Output = Result<()>> + Send {
        let result = if self.fail_end_session.load(Ordering::SeqCst) {
            Err(SessionError::Identity("network unavailable".to_string()))
        } else {
            self.emit(None);
            Ok(())
        };

        async move { result }
    }

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<IdentityRecord>> + Send {
        let account = lock(&self.accounts).get(email).cloned();
        let result = match account {
            Some(account) if account.password == password => {
                self.emit(Some(account.identity.clone()));
                Ok(account.identity)
            },
            _ => Err(SessionError::InvalidCredentials),
        };

        async move { result }
    }

    fn request_password_reset(&self, email: &str) -> impl Future<Output = Result<()>> + Send {
        lock(&self.reset_requests).push(email.to_string());
        let result = if lock(&self.accounts).contains_key(email) {
            Ok(())
        } else {
            Err(SessionError::Identity("EMAIL_NOT_FOUND".to_string()))
        };

        async move { result }
    }

    fn change_password(
        &self,
        identity: &IdentityRecord,
        new_password: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let result = if self.current_identity().as_ref() == Some(identity) {
            let mut accounts = lock(&self.accounts);
            for account in accounts.values_mut() {
                if account.identity.uid == identity.uid {
                    account.password = new_password.to_string();
                }
            }
            Ok(())
        } else {
            Err(SessionError::NotSignedIn)
        };

        async move { result }
    }
}
