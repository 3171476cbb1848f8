//! `/events` endpoints

use crate::client::MarketplaceClient;
use crate::error::ApiError;
use crate::types::{Event, EventRequest};

impl MarketplaceClient {
    /// List all events
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        Self::send_json(self.get("/events")).await
    }

    /// Fetch one event
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the event does not exist.
    pub async fn get_event(&self, id: &str) -> Result<Event, ApiError> {
        Self::send_json(self.get(&format!("/events/{id}"))).await
    }

    /// Create an event
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the event.
    #[tracing::instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_event(&self, request: &EventRequest) -> Result<Event, ApiError> {
        Self::send_json(self.post("/events").json(request)).await
    }

    /// Replace an event's editable fields
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend rejects the update.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_event(&self, id: &str, request: &EventRequest) -> Result<Event, ApiError> {
        Self::send_json(self.put(&format!("/events/{id}")).json(request)).await
    }

    /// Flip whether an event accepts bookings
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_booking(&self, id: &str) -> Result<Event, ApiError> {
        Self::send_json(self.put(&format!("/events/{id}/toggle-booking"))).await
    }

    /// Delete an event; returns the backend's confirmation message
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> Result<String, ApiError> {
        Self::send_text(self.delete(&format!("/events/{id}"))).await
    }
}
