//! Identity toolkit provider.
//!
//! Talks to the managed identity service over its REST API:
//!
//! - `accounts:signInWithPassword` for email/password sign-in
//! - `token` on the secure token service for ID token refresh
//! - `accounts:sendOobCode` for password reset mail
//! - `accounts:update` for password changes
//!
//! Credentials (ID token, refresh token, expiry) stay inside the provider.
//! With [`ToolkitIdentityProvider::with_persistence`] they also survive a
//! restart, so a previously signed-in identity is reported again on the
//! next subscription.

use crate::config::IdentityConfig;
use crate::error::{Result, SessionError};
use crate::providers::{IdentityProvider, IdentityStream};
use crate::state::IdentityRecord;
use chrono::{DateTime, Duration, Utc};
use eventmarketplace_api::BearerToken;
use eventmarketplace_core::environment::{Clock, SystemClock};
use eventmarketplace_core::storage::KeyValueStorage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// ID tokens this close to expiry are refreshed before use.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Provider for the managed identity toolkit.
///
/// Cheap to clone; clones share credentials and subscribers.
///
/// # Example
///
/// ```no_run
/// use eventmarketplace_session::config::IdentityConfig;
/// use eventmarketplace_session::providers::{IdentityProvider, ToolkitIdentityProvider};
///
/// # async fn run() -> eventmarketplace_session::Result<()> {
/// let provider = ToolkitIdentityProvider::new(IdentityConfig::new("web-api-key"));
/// let identity = provider.sign_in("ana@example.com", "secret1").await?;
/// let token = provider.get_token(&identity).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ToolkitIdentityProvider {
    config: IdentityConfig,
    http_client: Client,
    clock: Arc<dyn Clock>,
    credentials: Arc<Mutex<Option<Credentials>>>,
    identity: Arc<watch::Sender<Option<IdentityRecord>>>,
    persistence: Option<Persistence>,
}

#[derive(Clone)]
struct Persistence {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

#[derive(Clone, Serialize, Deserialize)]
struct Credentials {
    uid: String,
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl Credentials {
    fn identity(&self) -> IdentityRecord {
        IdentityRecord::new(self.uid.clone(), self.email.clone())
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(REFRESH_MARGIN_SECS)
    }
}

impl ToolkitIdentityProvider {
    /// Create a provider with no signed-in identity.
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            config,
            http_client: Client::new(),
            clock: Arc::new(SystemClock),
            credentials: Arc::new(Mutex::new(None)),
            identity: Arc::new(identity),
            persistence: None,
        }
    }

    /// Use `clock` for token expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Keep credentials in `storage` under `key` and restore any found there.
    ///
    /// Unreadable saved credentials are discarded with a warning.
    #[must_use]
    pub fn with_persistence(mut self, storage: Arc<dyn KeyValueStorage>, key: &str) -> Self {
        let restored = match storage.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Credentials>(&raw) {
                Ok(credentials) => Some(credentials),
                Err(error) => {
                    tracing::warn!(error = %error, "Discarding unreadable identity credentials");
                    None
                },
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(error = %error, "Could not read identity credentials");
                None
            },
        };

        if let Some(credentials) = restored {
            tracing::debug!(uid = %credentials.uid, "Restored identity credentials");
            self.identity.send_replace(Some(credentials.identity()));
            self.credentials = Arc::new(Mutex::new(Some(credentials)));
        }

        self.persistence = Some(Persistence {
            storage,
            key: key.to_string(),
        });
        self
    }

    /// Current identity, if signed in.
    #[must_use]
    pub fn current_identity(&self) -> Option<IdentityRecord> {
        self.identity.borrow().clone()
    }

    fn endpoint(base: &str, method: &str) -> String {
        format!("{}/{method}", base.trim_end_matches('/'))
    }

    async fn call<B, T>(&self, url: String, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http_client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| SessionError::Identity(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(toolkit_error(&body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SessionError::Identity(format!("Malformed toolkit response: {e}")))
    }

    /// Install new credentials, persist them and notify subscribers.
    ///
    /// Subscribers are notified even when the identity is unchanged: a new
    /// ID token for the same user is a change they must pick up.
    fn install(&self, slot: &mut Option<Credentials>, credentials: Credentials) {
        let identity = credentials.identity();
        self.persist(Some(&credentials));
        *slot = Some(credentials);
        self.identity.send_replace(Some(identity));
    }

    fn persist(&self, credentials: Option<&Credentials>) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        let result = match credentials {
            Some(credentials) => match serde_json::to_string(credentials) {
                Ok(raw) => persistence.storage.set(&persistence.key, &raw),
                Err(error) => {
                    tracing::warn!(error = %error, "Could not encode identity credentials");
                    return;
                },
            },
            None => persistence.storage.remove(&persistence.key),
        };

        if let Err(error) = result {
            tracing::warn!(error = %error, "Could not persist identity credentials");
        }
    }

    async fn refresh(&self, credentials: &Credentials) -> Result<Credentials> {
        let response: RefreshResponse = self
            .call(
                Self::endpoint(&self.config.secure_token_url, "token"),
                &RefreshRequest {
                    grant_type: "refresh_token",
                    refresh_token: &credentials.refresh_token,
                },
            )
            .await?;

        Ok(Credentials {
            uid: response.user_id.unwrap_or_else(|| credentials.uid.clone()),
            email: credentials.email.clone(),
            id_token: response.id_token,
            refresh_token: response.refresh_token,
            expires_at: self.expiry(&response.expires_in)?,
        })
    }

    fn expiry(&self, expires_in: &str) -> Result<DateTime<Utc>> {
        let secs = expires_in
            .parse::<i64>()
            .map_err(|e| SessionError::Identity(format!("Bad token lifetime: {e}")))?;
        Ok(self.clock.now() + Duration::seconds(secs))
    }

    fn credentials_from(&self, account: AccountResponse) -> Result<Credentials> {
        Ok(Credentials {
            expires_at: self.expiry(&account.expires_in)?,
            uid: account.local_id,
            email: account.email,
            id_token: account.id_token,
            refresh_token: account.refresh_token,
        })
    }
}

impl std::fmt::Debug for ToolkitIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolkitIdentityProvider")
            .field("config", &self.config)
            .field("identity", &*self.identity.borrow())
            .finish_non_exhaustive()
    }
}

impl IdentityProvider for ToolkitIdentityProvider {
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

    async fn get_token(&self, identity: &IdentityRecord) -> Result<BearerToken> {
        let mut slot = self.credentials.lock().await;
        let credentials = match slot.as_ref() {
            Some(credentials) if credentials.uid == identity.uid => credentials.clone(),
            _ => return Err(SessionError::NotSignedIn),
        };

        if credentials.is_fresh(self.clock.now()) {
            return Ok(BearerToken::new(credentials.id_token));
        }

        tracing::debug!(uid = %identity.uid, "Refreshing ID token");
        let refreshed = self.refresh(&credentials).await?;
        let token = BearerToken::new(refreshed.id_token.clone());
        self.install(&mut slot, refreshed);
        Ok(token)
    }

    async fn end_session(&self) -> Result<()> {
        let mut slot = self.credentials.lock().await;
        *slot = None;
        self.persist(None);
        self.identity.send_replace(None);
        tracing::debug!("Identity session ended");
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityRecord> {
        let account: AccountResponse = self
            .call(
                Self::endpoint(&self.config.identity_url, "accounts:signInWithPassword"),
                &PasswordRequest {
                    email: Some(email),
                    password,
                    id_token: None,
                    return_secure_token: true,
                },
            )
            .await?;

        let credentials = self.credentials_from(account)?;
        let identity = credentials.identity();
        let mut slot = self.credentials.lock().await;
        self.install(&mut slot, credentials);
        Ok(identity)
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let _: serde_json::Value = self
            .call(
                Self::endpoint(&self.config.identity_url, "accounts:sendOobCode"),
                &OobRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;
        Ok(())
    }

    async fn change_password(&self, identity: &IdentityRecord, new_password: &str) -> Result<()> {
        let mut slot = self.credentials.lock().await;
        let id_token = match slot.as_ref() {
            Some(credentials) if credentials.uid == identity.uid => credentials.id_token.clone(),
            _ => return Err(SessionError::NotSignedIn),
        };

        let account: AccountResponse = self
            .call(
                Self::endpoint(&self.config.identity_url, "accounts:update"),
                &PasswordRequest {
                    email: None,
                    password: new_password,
                    id_token: Some(&id_token),
                    return_secure_token: true,
                },
            )
            .await?;

        let credentials = self.credentials_from(account)?;
        self.install(&mut slot, credentials);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_token: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a toolkit error body to a session error.
fn toolkit_error(body: &str) -> SessionError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    // Messages may carry a suffix, e.g. "WEAK_PASSWORD : Password should be..."
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            SessionError::InvalidCredentials
        },
        _ => SessionError::Identity(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolkit_error_mapping() {
        let body = r#"{"error":{"code":400,"message":"INVALID_PASSWORD"}}"#;
        assert_eq!(toolkit_error(body), SessionError::InvalidCredentials);

        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        assert!(matches!(
            toolkit_error(body),
            SessionError::Identity(message) if message.starts_with("WEAK_PASSWORD")
        ));

        assert_eq!(
            toolkit_error("gateway down"),
            SessionError::Identity("gateway down".to_string())
        );
    }

    #[test]
    fn test_freshness_margin() {
        let now = Utc::now();
        let credentials = Credentials {
            uid: "u1".to_string(),
            email: None,
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: now + Duration::seconds(61),
        };
        assert!(credentials.is_fresh(now));
        assert!(!credentials.is_fresh(now + Duration::seconds(1)));
    }

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            ToolkitIdentityProvider::endpoint("http://localhost:9099/v1/", "accounts:update"),
            "http://localhost:9099/v1/accounts:update"
        );
    }
}
