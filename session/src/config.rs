//! Session client configuration.
//!
//! Values come from the environment (optionally a `.env` file) through
//! [`ClientConfig::from_env`], or are built in code with the `with_*`
//! builders. Nothing here is read again after the client starts.

use crate::error::{Result, SessionError};
use eventmarketplace_api::DEFAULT_API_URL;
use std::path::PathBuf;
use std::time::Duration;

/// Default durable storage key for the bearer token.
pub const DEFAULT_TOKEN_KEY: &str = "firebaseToken";

/// Default identity toolkit endpoint.
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Default secure token (refresh) endpoint.
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Default file backing durable storage, relative to the working directory.
pub const DEFAULT_STORAGE_PATH: &str = ".eventmarketplace/session.json";

/// Session store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Durable storage key holding the bearer token.
    ///
    /// Default: `firebaseToken`
    pub token_key: String,

    /// How long `teardown` waits for in-flight effects.
    ///
    /// Default: 5 seconds
    pub shutdown_timeout: Duration,

    /// How long caller-facing operations (sign-in, logout) wait for the
    /// store to report their outcome.
    ///
    /// Default: 10 seconds
    pub request_timeout: Duration,
}

impl SessionConfig {
    /// Create a session configuration storing the token under `token_key`.
    #[must_use]
    pub const fn new(token_key: String) -> Self {
        Self {
            token_key,
            shutdown_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Set the shutdown timeout.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_KEY.to_string())
    }
}

/// Identity toolkit configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Public web API key of the identity project.
    pub api_key: String,

    /// Identity toolkit base URL (sign-in, password reset, account update).
    pub identity_url: String,

    /// Secure token base URL (ID token refresh).
    pub secure_token_url: String,
}

impl IdentityConfig {
    /// Create an identity configuration for the hosted toolkit.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            secure_token_url: DEFAULT_SECURE_TOKEN_URL.to_string(),
        }
    }

    /// Point both endpoints at `base_url`, e.g. an emulator or test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.identity_url.clone_from(&base_url);
        self.secure_token_url = base_url;
        self
    }

    /// Set the identity toolkit URL.
    #[must_use]
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into();
        self
    }

    /// Set the secure token URL.
    #[must_use]
    pub fn with_secure_token_url(mut self, url: impl Into<String>) -> Self {
        self.secure_token_url = url.into();
        self
    }
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("api_key", &"<redacted>")
            .field("identity_url", &self.identity_url)
            .field("secure_token_url", &self.secure_token_url)
            .finish()
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Marketplace backend base URL.
    ///
    /// Default: `http://localhost:8080/api`
    pub api_url: String,

    /// File backing durable storage.
    ///
    /// Default: `.eventmarketplace/session.json`
    pub storage_path: PathBuf,

    /// Session store settings.
    pub session: SessionConfig,

    /// Identity toolkit settings.
    pub identity: IdentityConfig,
}

impl ClientConfig {
    /// Create a configuration with defaults and the given identity API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            session: SessionConfig::default(),
            identity: IdentityConfig::new(api_key),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `MARKETPLACE_API_URL` | `http://localhost:8080/api` |
    /// | `MARKETPLACE_TOKEN_KEY` | `firebaseToken` |
    /// | `MARKETPLACE_STORAGE_PATH` | `.eventmarketplace/session.json` |
    /// | `MARKETPLACE_IDENTITY_API_KEY` | required |
    /// | `MARKETPLACE_IDENTITY_URL` | hosted toolkit |
    /// | `MARKETPLACE_SECURE_TOKEN_URL` | hosted secure token service |
    /// | `MARKETPLACE_REQUEST_TIMEOUT_SECS` | `10` |
    /// | `MARKETPLACE_SHUTDOWN_TIMEOUT_SECS` | `5` |
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the API key is missing or a
    /// timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("MARKETPLACE_IDENTITY_API_KEY").ok_or_else(|| {
            SessionError::Config("MARKETPLACE_IDENTITY_API_KEY is not set".to_string())
        })?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup("MARKETPLACE_API_URL") {
            config.api_url = url;
        }
        if let Some(key) = lookup("MARKETPLACE_TOKEN_KEY") {
            config.session.token_key = key;
        }
        if let Some(path) = lookup("MARKETPLACE_STORAGE_PATH") {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("MARKETPLACE_IDENTITY_URL") {
            config.identity.identity_url = url;
        }
        if let Some(url) = lookup("MARKETPLACE_SECURE_TOKEN_URL") {
            config.identity.secure_token_url = url;
        }
        if let Some(secs) = lookup("MARKETPLACE_REQUEST_TIMEOUT_SECS") {
            config.session.request_timeout = parse_secs("MARKETPLACE_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("MARKETPLACE_SHUTDOWN_TIMEOUT_SECS") {
            config.session.shutdown_timeout =
                parse_secs("MARKETPLACE_SHUTDOWN_TIMEOUT_SECS", &secs)?;
        }

        Ok(config)
    }

    /// Set the backend URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Persist the token to `path`.
    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Replace the session settings.
    #[must_use]
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Replace the identity settings.
    #[must_use]
    pub fn with_identity(mut self, identity: IdentityConfig) -> Self {
        self.identity = identity;
        self
    }
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| SessionError::Config(format!("{name}: {e}")))
}

#[cfg(test)]
#[allow(clippy::panic)] // Tests are allowed to panic on failures
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("MARKETPLACE_IDENTITY_API_KEY", "k")]));
        let Ok(config) = config else {
            panic!("config should load");
        };

        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.session.token_key, "firebaseToken");
        assert_eq!(config.session.request_timeout, Duration::from_secs(10));
        assert_eq!(config.session.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.identity.identity_url, DEFAULT_IDENTITY_URL);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MARKETPLACE_IDENTITY_API_KEY", "k"),
            ("MARKETPLACE_API_URL", "https://api.example.com/api"),
            ("MARKETPLACE_TOKEN_KEY", "token"),
            ("MARKETPLACE_STORAGE_PATH", "/tmp/session.json"),
            ("MARKETPLACE_REQUEST_TIMEOUT_SECS", "3"),
        ]));
        let Ok(config) = config else {
            panic!("config should load");
        };

        assert_eq!(config.api_url, "https://api.example.com/api");
        assert_eq!(config.session.token_key, "token");
        assert_eq!(config.session.request_timeout, Duration::from_secs(3));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_missing_api_key() {
        let result = ClientConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_bad_timeout() {
        let result = ClientConfig::from_lookup(lookup(&[
            ("MARKETPLACE_IDENTITY_API_KEY", "k"),
            ("MARKETPLACE_SHUTDOWN_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_identity_debug_hides_key() {
        let identity = IdentityConfig::new("secret-key").with_base_url("http://localhost:9099");
        let printed = format!("{identity:?}");
        assert!(!printed.contains("secret-key"));
        assert_eq!(identity.secure_token_url, "http://localhost:9099");
    }
}
