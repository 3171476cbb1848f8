//! # Event Marketplace API Client
//!
//! Typed REST client for the event marketplace backend: authentication,
//! events, bookings, the supplier directory and the organizer dashboard.
//!
//! ## Example
//!
//! ```no_run
//! use eventmarketplace_api::{BearerToken, MarketplaceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from MARKETPLACE_API_URL, or http://localhost:8080/api
//!     let client = MarketplaceClient::from_env()?;
//!
//!     let verified = client.verify_token(&BearerToken::new("id-token")).await?;
//!     if let Some(user) = verified.user {
//!         println!("Signed in as {} ({})", user.name, user.role);
//!     }
//!
//!     for event in client.list_events().await? {
//!         println!("{}", event.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod bookings;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod suppliers;
pub mod types;

// Re-export main types for convenience
pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, MarketplaceClient};
pub use error::ApiError;
pub use types::{
    BearerToken, Booking, BookingRequest, BookingResponse, BookingStatus, DashboardStats, Event,
    EventRequest, EventStats, EventStatus, EventType, Payment, PaymentMethod, PaymentStatus,
    ProfilePicture, ProfileUpdate, RegisterRequest, Role, ServiceType, Supplier, SupplierRequest,
    User, VerifyResponse,
};
