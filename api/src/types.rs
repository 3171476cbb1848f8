//! Wire types for the marketplace REST API
//!
//! Field names follow the backend's camelCase JSON. Almost everything the
//! backend stores is nullable, so most fields are optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp (de)serialization for backend instants.
///
/// The backend may emit an instant as an RFC 3339 string, as fractional
/// epoch seconds, or as a `{seconds, nanos}` object. All three are accepted;
/// timestamps are always written back as RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Seconds(f64),
        Parts {
            seconds: i64,
            #[serde(default)]
            nanos: u32,
        },
    }

    /// Serialize an optional timestamp as RFC 3339
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error.
    #[allow(clippy::ref_option)] // signature required by `#[serde(with)]`
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => {
                serializer.serialize_some(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
            },
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp in any of the accepted shapes
    ///
    /// # Errors
    ///
    /// Fails on unparseable strings or out-of-range instants.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(wire) = Option::<Wire>::deserialize(deserializer)? else {
            return Ok(None);
        };

        let parsed = match wire {
            Wire::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|t| t.with_timezone(&Utc))
                .map_err(D::Error::custom)?,
            Wire::Seconds(value) => {
                let seconds = value.trunc() as i64;
                let nanos = (value.fract().abs() * 1e9).round() as u32;
                DateTime::from_timestamp(seconds, nanos.min(999_999_999))
                    .ok_or_else(|| D::Error::custom("timestamp out of range"))?
            },
            Wire::Parts { seconds, nanos } => DateTime::from_timestamp(seconds, nanos)
                .ok_or_else(|| D::Error::custom("timestamp out of range"))?,
        };

        Ok(Some(parsed))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════

/// Marketplace role of a user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular customer: browses events and books tickets
    User,
    /// Creates and manages events
    Organizer,
    /// Lists services in the supplier directory
    Supplier,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Self; 3] = [Self::User, Self::Organizer, Self::Supplier];

    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Organizer => "ORGANIZER",
            Self::Supplier => "SUPPLIER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical user record owned by the backend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identity-provider uid, also the backend document id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Public URL of the profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    /// Marketplace role
    pub role: Role,
    /// Creation time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Minimal user record, mostly useful in tests and fixtures
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            phone_number: None,
            profile_picture_url: None,
            role,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// Short-lived bearer credential issued by the identity provider
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for `Authorization` headers and storage
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<redacted, {} bytes>)", self.0.len())
    }
}

impl From<String> for BearerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for BearerToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Response of `POST /auth/verify`
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Echo of the verified token
    #[serde(default)]
    pub firebase_token: Option<String>,
    /// The user the token belongs to; `None` when the backend has no user
    /// record for a valid token
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `POST /auth/register`
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email address, also the sign-in identifier
    pub email: String,
    /// Phone number
    pub phone_number: String,
    /// Initial password
    pub password: String,
    /// Requested role
    pub role: Role,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Profile fields sent as the `user` part of `PUT /auth/user/{uid}`
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone_number: String,
    /// Role; the backend keeps it unchanged for regular users
    pub role: Role,
}

/// New profile picture uploaded alongside a [`ProfileUpdate`]
#[derive(Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    /// Original file name
    pub file_name: String,
    /// MIME type, e.g. `image/png`
    pub mime: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ProfilePicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilePicture")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Events
// ═══════════════════════════════════════════════════════════════════════

/// Kind of event listing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Ticketed event open to the public
    PublicEvent,
    /// Package booked by a host
    HostPackage,
}

/// Lifecycle status of an event
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Open and upcoming
    Active,
    /// Canceled by the organizer
    Canceled,
    /// Already took place
    Completed,
}

/// An event listing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Listing kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    /// Venue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Start time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub event_date_time: Option<DateTime<Utc>>,
    /// Price of one seat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
    /// Total seats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Seats still bookable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_seats: Option<u32>,
    /// Image URLs
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Notes for suppliers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_notes: Option<String>,
    /// Lifecycle status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    /// Whether new bookings are accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_enabled: Option<bool>,
    /// Creation time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of bookings so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bookings: Option<u32>,
    /// Revenue so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
}

/// Body of event create/update requests
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Title
    pub title: String,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Listing kind
    pub event_type: EventType,
    /// Venue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Start time
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub event_date_time: Option<DateTime<Utc>>,
    /// Price of one seat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
    /// Total seats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Image URLs
    pub image_urls: Vec<String>,
    /// Notes for suppliers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_notes: Option<String>,
    /// Whether new bookings are accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_enabled: Option<bool>,
}

// ═══════════════════════════════════════════════════════════════════════
// Bookings and payments
// ═══════════════════════════════════════════════════════════════════════

/// Booking status
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting payment
    Pending,
    /// Paid and confirmed
    Confirmed,
    /// Canceled
    Canceled,
}

/// Payment status
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Not yet settled
    Pending,
    /// Settled
    Completed,
    /// Declined or errored
    Failed,
    /// Returned to the customer
    Refunded,
}

/// Payment method chosen at booking time
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Credit card
    CreditCard,
    /// `PayPal`
    Paypal,
    /// Stripe
    Stripe,
    /// Cash at the venue
    Cash,
    /// Bank transfer
    BankTransfer,
}

/// A ticket booking
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    /// Booking user
    #[serde(default)]
    pub user_id: String,
    /// Booked event
    #[serde(default)]
    pub event_id: String,
    /// Seats booked
    #[serde(default)]
    pub number_of_seats: u32,
    /// Total price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Booking status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    /// Time of booking
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Associated payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Payment status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// Denormalized user name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Denormalized user email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Denormalized user phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    /// Denormalized event title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    /// Denormalized event start time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub event_date_time: Option<DateTime<Utc>>,
    /// Denormalized event venue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_location: Option<String>,
}

/// Body of `POST /bookings`
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Event to book
    pub event_id: String,
    /// Seats to book
    pub number_of_seats: u32,
    /// How the booking is paid
    pub payment_method: PaymentMethod,
}

/// A payment record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Paid booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Amount charged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Payment status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    /// Gateway transaction id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Response of `POST /bookings`
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// The created booking
    pub booking: Booking,
    /// The payment, when one was processed
    #[serde(default)]
    pub payment: Option<Payment>,
    /// Human-readable outcome
    #[serde(default)]
    pub message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Suppliers
// ═══════════════════════════════════════════════════════════════════════

/// Category of supplier service
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    /// Food and drink
    Catering,
    /// Decoration
    Decoration,
    /// Music and shows
    Entertainment,
    /// Photography
    Photography,
    /// Venue rental
    Venue,
    /// Equipment rental
    Equipment,
    /// Anything else
    Other,
}

/// A supplier directory listing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Document id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning user
    #[serde(default)]
    pub user_id: String,
    /// Business name
    #[serde(default)]
    pub name: String,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Description of services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<ServiceType>,
    /// City served
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Creation time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of supplier create/update requests
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRequest {
    /// Owning user
    pub user_id: String,
    /// Business name
    pub name: String,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Description of services
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service category
    pub service_type: ServiceType,
    /// City served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Organizer dashboard
// ═══════════════════════════════════════════════════════════════════════

/// Per-event figures on the organizer dashboard
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    /// Event id
    pub event_id: String,
    /// Event title
    #[serde(default)]
    pub event_title: String,
    /// Bookings for this event
    #[serde(default)]
    pub total_bookings: u32,
    /// Total seats
    #[serde(default)]
    pub total_capacity: u32,
    /// Seats still bookable
    #[serde(default)]
    pub available_seats: u32,
    /// Revenue for this event
    #[serde(default)]
    pub total_revenue: f64,
}

/// Response of `GET /dashboard/organization`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Per-event figures
    #[serde(default)]
    pub event_stats: Vec<EventStats>,
    /// Bookings across all events
    #[serde(default)]
    pub total_bookings: u32,
    /// Revenue across all events
    #[serde(default)]
    pub total_revenue: f64,
    /// Most recent bookings
    #[serde(default)]
    pub recent_bookings: Vec<Booking>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_wire_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_value(Role::Organizer)?, json!("ORGANIZER"));
        let role: Role = serde_json::from_value(json!("SUPPLIER"))?;
        assert_eq!(role, Role::Supplier);
        assert_eq!(Role::User.to_string(), "USER");
        Ok(())
    }

    #[test]
    fn test_user_from_backend_json() -> Result<(), serde_json::Error> {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ana",
            "email": "ana@example.com",
            "phoneNumber": "+40 700 000 000",
            "profilePictureUrl": null,
            "role": "USER",
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": 1_740_823_200.5
        }))?;

        assert_eq!(user.id, "u1");
        assert_eq!(user.phone_number.as_deref(), Some("+40 700 000 000"));
        assert_eq!(user.profile_picture_url, None);
        assert_eq!(
            user.created_at.map(|t| t.timestamp()),
            Some(1_740_823_200)
        );
        assert_eq!(
            user.updated_at.map(|t| t.timestamp_subsec_millis()),
            Some(500)
        );
        Ok(())
    }

    #[test]
    fn test_timestamp_parts_object() -> Result<(), serde_json::Error> {
        let booking: Booking = serde_json::from_value(json!({
            "userId": "u1",
            "eventId": "e1",
            "numberOfSeats": 2,
            "bookingDate": { "seconds": 1_700_000_000, "nanos": 0 }
        }))?;

        assert_eq!(
            booking.booking_date.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert_eq!(booking.status, None);
        Ok(())
    }

    #[test]
    fn test_bearer_token_debug_is_redacted() {
        let token = BearerToken::new("eyJhbGciOi.secret");
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret"));
        assert_eq!(token.as_str(), "eyJhbGciOi.secret");
    }

    #[test]
    fn test_register_request_debug_hides_password() {
        let request = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "1".to_string(),
            password: "hunter22".to_string(),
            role: Role::User,
        };
        assert!(!format!("{request:?}").contains("hunter22"));
    }

    #[test]
    fn test_booking_request_wire_shape() -> Result<(), serde_json::Error> {
        let request = BookingRequest {
            event_id: "e1".to_string(),
            number_of_seats: 3,
            payment_method: PaymentMethod::CreditCard,
        };
        assert_eq!(
            serde_json::to_value(&request)?,
            json!({ "eventId": "e1", "numberOfSeats": 3, "paymentMethod": "CREDIT_CARD" })
        );
        Ok(())
    }
}
