//! `/bookings` endpoints

use crate::client::MarketplaceClient;
use crate::error::ApiError;
use crate::types::{Booking, BookingRequest, BookingResponse};

impl MarketplaceClient {
    /// List every booking (organizer view)
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        Self::send_json(self.get("/bookings")).await
    }

    /// Fetch one booking
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the booking does not exist.
    pub async fn get_booking(&self, id: &str) -> Result<Booking, ApiError> {
        Self::send_json(self.get(&format!("/bookings/{id}"))).await
    }

    /// Book seats for `user_id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the backend refuses the booking
    /// (sold out, bookings disabled, payment declined).
    #[tracing::instrument(skip(self, request), fields(event_id = %request.event_id, seats = request.number_of_seats))]
    pub async fn create_booking(
        &self,
        user_id: &str,
        request: &BookingRequest,
    ) -> Result<BookingResponse, ApiError> {
        Self::send_json(
            self.post("/bookings")
                .query(&[("userId", user_id)])
                .json(request),
        )
        .await
    }

    /// Bookings of `user_id` for events that have not started yet
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn upcoming_bookings(&self, user_id: &str) -> Result<Vec<Booking>, ApiError> {
        Self::send_json(self.get(&format!("/bookings/user/{user_id}/upcoming"))).await
    }

    /// Bookings of `user_id` for events in the past
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn past_bookings(&self, user_id: &str) -> Result<Vec<Booking>, ApiError> {
        Self::send_json(self.get(&format!("/bookings/user/{user_id}/past"))).await
    }
}
