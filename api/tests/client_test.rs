//! HTTP-level tests for the marketplace client against a mock backend

#![allow(clippy::unwrap_used, clippy::expect_used)]

use eventmarketplace_api::{
    ApiError, BearerToken, BookingRequest, MarketplaceClient, PaymentMethod, ProfilePicture,
    ProfileUpdate, RegisterRequest, Role,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Ana Pop",
        "email": "ana@example.com",
        "phoneNumber": "0700",
        "role": role
    })
}

fn client_for(server: &MockServer) -> MarketplaceClient {
    MarketplaceClient::new(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn verify_sends_bearer_token_and_decodes_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firebaseToken": "abc",
            "user": user_json("u1", "USER")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.verify_token(&BearerToken::new("abc")).await.unwrap();

    assert_eq!(response.firebase_token.as_deref(), Some("abc"));
    let user = response.user.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn verify_decodes_missing_user_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firebaseToken": "abc",
            "user": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.verify_token(&BearerToken::new("abc")).await.unwrap();

    assert_eq!(response.user, None);
}

#[tokio::test]
async fn verify_maps_401_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.verify_token(&BearerToken::new("expired")).await;

    assert_eq!(result, Err(ApiError::Unauthorized));
}

#[tokio::test]
async fn verify_reports_unreachable_backend() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = MarketplaceClient::new(format!("{uri}/api"));
    let result = client.verify_token(&BearerToken::new("abc")).await;

    assert!(matches!(result, Err(ApiError::RequestFailed(_))));
}

#[tokio::test]
async fn register_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "name": "Ana Pop",
            "email": "ana@example.com",
            "phoneNumber": "0700",
            "password": "secret1",
            "role": "ORGANIZER"
        })))
        .respond_with(ResponseTemplate::new(400).set_body_string("Email already exists"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .register(&RegisterRequest {
            name: "Ana Pop".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "0700".to_string(),
            password: "secret1".to_string(),
            role: Role::Organizer,
        })
        .await;

    assert_eq!(
        result,
        Err(ApiError::Status {
            status: 400,
            message: "Email already exists".to_string(),
        })
    );
}

#[tokio::test]
async fn update_profile_sends_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/user/u1"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "name": "Ana Maria",
            "email": "ana@example.com",
            "profilePictureUrl": "https://cdn.example.com/u1.png",
            "role": "USER"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client
        .update_profile(
            "u1",
            &ProfileUpdate {
                name: "Ana Maria".to_string(),
                email: "ana@example.com".to_string(),
                phone_number: "0700".to_string(),
                role: Role::User,
            },
            Some(ProfilePicture {
                file_name: "me.png".to_string(),
                mime: "image/png".to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        )
        .await
        .unwrap();

    assert_eq!(user.name, "Ana Maria");
    assert_eq!(
        user.profile_picture_url.as_deref(),
        Some("https://cdn.example.com/u1.png")
    );

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(body.contains("name=\"user\""));
    assert!(body.contains("\"phoneNumber\":\"0700\""));
    assert!(body.contains("filename=\"me.png\""));
}

#[tokio::test]
async fn delete_profile_picture_attaches_token_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/user/u1/profile-picture"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "USER")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = client
        .delete_profile_picture("u1", Some(&BearerToken::new("tok")))
        .await
        .unwrap();

    assert_eq!(user.profile_picture_url, None);
}

#[tokio::test]
async fn create_booking_passes_user_id_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(query_param("userId", "u1"))
        .and(body_json(json!({
            "eventId": "e1",
            "numberOfSeats": 2,
            "paymentMethod": "PAYPAL"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "booking": {
                "id": "b1",
                "referenceNumber": "BK-0001",
                "userId": "u1",
                "eventId": "e1",
                "numberOfSeats": 2,
                "totalPrice": 50.0,
                "status": "CONFIRMED",
                "paymentStatus": "COMPLETED"
            },
            "payment": { "id": "p1", "amount": 50.0, "status": "COMPLETED", "method": "PAYPAL" },
            "message": "Booking confirmed"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .create_booking(
            "u1",
            &BookingRequest {
                event_id: "e1".to_string(),
                number_of_seats: 2,
                payment_method: PaymentMethod::Paypal,
            },
        )
        .await
        .unwrap();

    assert_eq!(response.booking.reference_number.as_deref(), Some("BK-0001"));
    assert_eq!(response.payment.and_then(|p| p.amount), Some(50.0));
    assert_eq!(response.message.as_deref(), Some("Booking confirmed"));
}

#[tokio::test]
async fn events_and_dashboard_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "e1",
                "title": "Jazz Night",
                "eventType": "PUBLIC_EVENT",
                "city": "Cluj",
                "eventDateTime": "2025-06-01T19:00:00Z",
                "ticketPrice": 25.0,
                "capacity": 100,
                "availableSeats": 40,
                "imageUrls": [],
                "status": "ACTIVE",
                "bookingEnabled": true
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/organization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "eventStats": [{
                "eventId": "e1",
                "eventTitle": "Jazz Night",
                "totalBookings": 3,
                "totalCapacity": 100,
                "availableSeats": 40,
                "totalRevenue": 1500.0
            }],
            "totalBookings": 3,
            "totalRevenue": 1500.0,
            "recentBookings": []
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let events = client.list_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].available_seats, Some(40));
    assert_eq!(events[0].booking_enabled, Some(true));

    let stats = client.organization_dashboard().await.unwrap();
    assert_eq!(stats.total_bookings, 3);
    assert_eq!(stats.event_stats[0].event_title, "Jazz Night");
}

#[tokio::test]
async fn delete_event_returns_confirmation_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/events/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Event deleted"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.delete_event("e1").await.unwrap(), "Event deleted");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.list_suppliers().await;

    assert!(matches!(result, Err(ApiError::ResponseParseFailed(_))));
}
