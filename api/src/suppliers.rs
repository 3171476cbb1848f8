//! `/suppliers` endpoints

use crate::client::MarketplaceClient;
use crate::error::ApiError;
use crate::types::{Supplier, SupplierRequest};

impl MarketplaceClient {
    /// Create a supplier listing
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the listing.
    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn register_supplier(&self, request: &SupplierRequest) -> Result<Supplier, ApiError> {
        Self::send_json(self.post("/suppliers").json(request)).await
    }

    /// List the supplier directory
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        Self::send_json(self.get("/suppliers")).await
    }

    /// Fetch the listing owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the user has no listing.
    pub async fn supplier_for_user(&self, user_id: &str) -> Result<Supplier, ApiError> {
        Self::send_json(self.get(&format!("/suppliers/user/{user_id}"))).await
    }

    /// Update a listing
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the update.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_supplier(
        &self,
        id: &str,
        request: &SupplierRequest,
    ) -> Result<Supplier, ApiError> {
        Self::send_json(self.put(&format!("/suppliers/{id}")).json(request)).await
    }

    /// Delete a listing; returns the backend's confirmation message
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    #[tracing::instrument(skip(self))]
    pub async fn delete_supplier(&self, id: &str) -> Result<String, ApiError> {
        Self::send_text(self.delete(&format!("/suppliers/{id}"))).await
    }
}
