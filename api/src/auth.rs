//! `/auth` endpoints: registration, token verification and profile maintenance

use crate::client::MarketplaceClient;
use crate::error::ApiError;
use crate::types::{BearerToken, ProfilePicture, ProfileUpdate, RegisterRequest, User, VerifyResponse};
use reqwest::multipart::{Form, Part};

impl MarketplaceClient {
    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the backend's message when registration
    /// is rejected (e.g. email already in use).
    #[tracing::instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        Self::send_json(self.post("/auth/register").json(request)).await
    }

    /// Exchange a bearer token for the canonical user record
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when the backend rejects the token and
    /// `ApiError::RequestFailed` when the backend is unreachable.
    #[tracing::instrument(skip_all)]
    pub async fn verify_token(&self, token: &BearerToken) -> Result<VerifyResponse, ApiError> {
        Self::send_authenticated_json(self.post("/auth/verify").bearer_auth(token.as_str())).await
    }

    /// Update profile fields and optionally replace the profile picture
    ///
    /// Sent as multipart: a `user` JSON part and an optional `file` part.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the update.
    #[tracing::instrument(skip(self, update, picture), fields(has_picture = picture.is_some()))]
    pub async fn update_profile(
        &self,
        uid: &str,
        update: &ProfileUpdate,
        picture: Option<ProfilePicture>,
    ) -> Result<User, ApiError> {
        let user_json =
            serde_json::to_string(update).map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        let user_part = Part::text(user_json)
            .mime_str("application/json")
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let mut form = Form::new().part("user", user_part);
        if let Some(picture) = picture {
            let file_part = Part::bytes(picture.bytes)
                .file_name(picture.file_name)
                .mime_str(&picture.mime)
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            form = form.part("file", file_part);
        }

        Self::send_json(self.put(&format!("/auth/user/{uid}")).multipart(form)).await
    }

    /// Remove the profile picture
    ///
    /// The bearer token is attached when one is available.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the request.
    #[tracing::instrument(skip(self, token))]
    pub async fn delete_profile_picture(
        &self,
        uid: &str,
        token: Option<&BearerToken>,
    ) -> Result<User, ApiError> {
        let mut request = self.delete(&format!("/auth/user/{uid}/profile-picture"));
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        Self::send_json(request).await
    }

    /// Delete the account; returns the backend's confirmation message
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the request.
    #[tracing::instrument(skip(self))]
    pub async fn delete_account(&self, uid: &str) -> Result<String, ApiError> {
        Self::send_text(self.delete(&format!("/auth/user/{uid}"))).await
    }
}
