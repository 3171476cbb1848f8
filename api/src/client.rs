//! Marketplace REST client

use crate::error::ApiError;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the marketplace backend
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct MarketplaceClient {
    client: Client,
    base_url: String,
}

impl MarketplaceClient {
    /// Create a client with the base URL from `MARKETPLACE_API_URL`
    ///
    /// Falls back to [`DEFAULT_API_URL`] when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var("MARKETPLACE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client for `base_url` (e.g. `http://localhost:8080/api`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize(base_url.into()),
        }
    }

    /// Create a client whose requests time out after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize(base_url.into()),
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T>(request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = Self::send_checked(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }

    /// Send a request and return the body as text
    pub(crate) async fn send_text(request: RequestBuilder) -> Result<String, ApiError> {
        let response = Self::send_checked(request).await?;
        response
            .text()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }

    async fn send_checked(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "Backend returned an error status");
        Err(ApiError::Status {
            status: status.as_u16(),
            message: body,
        })
    }

    /// Like [`send_json`](Self::send_json), but maps `401` to
    /// [`ApiError::Unauthorized`]
    pub(crate) async fn send_authenticated_json<T>(request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        match Self::send_json(request).await {
            Err(ApiError::Status { status, .. }) if status == StatusCode::UNAUTHORIZED.as_u16() => {
                Err(ApiError::Unauthorized)
            },
            other => other,
        }
    }
}

fn normalize(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
