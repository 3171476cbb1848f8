//! Session against a mock marketplace backend

#![allow(clippy::unwrap_used, clippy::expect_used)]

use eventmarketplace_api::{
    BearerToken, MarketplaceClient, ProfileUpdate, RegisterRequest, Role, User,
};
use eventmarketplace_runtime::Store;
use eventmarketplace_session::mocks::MockIdentityProvider;
use eventmarketplace_session::{
    GuardDecision, Redirect, Route, SessionAction, SessionClient, SessionConfig,
    SessionEnvironment, SessionReducer, SessionState,
};
use eventmarketplace_testing::InMemoryStorage;
use eventmarketplace_testing::helpers::init_test_tracing;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "firebaseToken";

type Env = SessionEnvironment<MockIdentityProvider, MarketplaceClient>;

fn user_json(id: &str, name: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": "ana@example.com",
        "phoneNumber": "0700",
        "role": role
    })
}

fn api(server: &MockServer) -> MarketplaceClient {
    MarketplaceClient::new(format!("{}/api", server.uri()))
}

fn environment(
    identity: &MockIdentityProvider,
    server: &MockServer,
    storage: &InMemoryStorage,
) -> Env {
    SessionEnvironment::new(
        identity.clone(),
        api(server),
        Arc::new(storage.clone()),
        SessionConfig::default().with_request_timeout(Duration::from_secs(2)),
    )
}

async fn start(
    identity: &MockIdentityProvider,
    server: &MockServer,
    storage: &InMemoryStorage,
) -> SessionClient<MockIdentityProvider, MarketplaceClient> {
    init_test_tracing();
    SessionClient::bootstrap(environment(identity, server, storage), api(server))
        .await
        .expect("bootstrap should succeed")
}

/// A signed-in organizer, established without touching the backend.
async fn signed_in_organizer(
    server: &MockServer,
    storage: &InMemoryStorage,
) -> SessionClient<MockIdentityProvider, MarketplaceClient> {
    let session = start(&MockIdentityProvider::new(), server, storage).await;
    session
        .login(
            BearerToken::new("abc"),
            User::new("u1", Role::Organizer).with_name("Ana Pop"),
        )
        .await
        .unwrap();
    session
}

#[tokio::test]
async fn restored_token_is_verified_by_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firebaseToken": "abc",
            "user": user_json("u1", "Ana Pop", "ORGANIZER")
        })))
        .expect(1..)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::with_entry(KEY, "abc");
    let identity = MockIdentityProvider::signed_in("u1", "abc");

    let session = start(&identity, &server, &storage).await;
    let view = session.ready().await.unwrap();

    assert_eq!(view.user.as_ref().map(|u| u.role), Some(Role::Organizer));
    assert_eq!(session.guard(&Route::OrganizerDashboard), GuardDecision::Render);
    assert_eq!(
        session.guard(&Route::SupplierDashboard),
        GuardDecision::Redirect(Redirect::Public)
    );

    session.teardown().await.unwrap();
}

#[tokio::test]
async fn unauthorized_token_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid token"))
        .expect(1)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::with_entry(KEY, "expired");
    let store = Store::new(
        SessionState::restoring(Some(BearerToken::new("expired"))),
        SessionReducer::new(),
        environment(&MockIdentityProvider::new(), &server, &storage),
    );

    let mut handle = store.send(SessionAction::Bootstrap).await.unwrap();
    handle.wait().await;

    assert!(
        store
            .state(|s| s.token.is_none() && s.user.is_none() && !s.loading)
            .await
    );
    assert_eq!(storage.peek(KEY), None);
}

#[tokio::test]
async fn token_without_backend_user_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firebaseToken": "orphan",
            "user": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::with_entry(KEY, "orphan");
    let store = Store::new(
        SessionState::restoring(Some(BearerToken::new("orphan"))),
        SessionReducer::new(),
        environment(&MockIdentityProvider::new(), &server, &storage),
    );

    let mut handle = store.send(SessionAction::Bootstrap).await.unwrap();
    handle.wait().await;

    assert!(
        store
            .state(|s| s.token.is_none() && s.user.is_none() && !s.loading)
            .await
    );
    assert_eq!(storage.peek(KEY), None);
}

#[tokio::test]
async fn update_profile_refreshes_session_user() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/user/u1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_json("u1", "Ana Ionescu", "ORGANIZER")),
        )
        .expect(1)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::new();
    let session = signed_in_organizer(&server, &storage).await;

    let update = ProfileUpdate {
        name: "Ana Ionescu".to_string(),
        email: "ana@example.com".to_string(),
        phone_number: "0700".to_string(),
        role: Role::Organizer,
    };
    let user = session.update_profile(&update, None).await.unwrap();

    assert_eq!(user.name, "Ana Ionescu");
    assert_eq!(session.view().user, Some(user));
    assert_eq!(storage.peek(KEY), Some("abc".to_string()));

    session.teardown().await.unwrap();
}

#[tokio::test]
async fn delete_profile_picture_sends_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/user/u1/profile-picture"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_json("u1", "Ana Pop", "ORGANIZER")),
        )
        .expect(1)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::new();
    let session = signed_in_organizer(&server, &storage).await;

    let user = session.delete_profile_picture().await.unwrap();

    assert_eq!(session.view().user, Some(user));

    session.teardown().await.unwrap();
}

#[tokio::test]
async fn failed_profile_update_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/auth/user/u1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Email already in use"))
        .mount(&server)
        .await;
    let storage = InMemoryStorage::new();
    let session = signed_in_organizer(&server, &storage).await;

    let update = ProfileUpdate {
        name: "Ana".to_string(),
        email: "taken@example.com".to_string(),
        phone_number: "0700".to_string(),
        role: Role::Organizer,
    };

    assert!(session.update_profile(&update, None).await.is_err());
    assert_eq!(
        session.view().user.map(|u| u.name).as_deref(),
        Some("Ana Pop")
    );

    session.teardown().await.unwrap();
}

#[tokio::test]
async fn delete_account_logs_out() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User deleted"))
        .expect(1)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::new();
    let session = signed_in_organizer(&server, &storage).await;

    session.delete_account().await.unwrap();

    let view = session.view();
    assert!(!view.is_signed_in());
    assert_eq!(storage.peek(KEY), None);
    assert_eq!(
        session.guard(&Route::Profile),
        GuardDecision::Redirect(Redirect::SignIn)
    );

    session.teardown().await.unwrap();
}

#[tokio::test]
async fn register_does_not_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u9", "Ion", "SUPPLIER")))
        .expect(1)
        .mount(&server)
        .await;
    let storage = InMemoryStorage::new();
    let session = start(&MockIdentityProvider::new(), &server, &storage).await;

    let request = RegisterRequest {
        name: "Ion".to_string(),
        email: "ion@example.com".to_string(),
        phone_number: "0711".to_string(),
        password: "secret1".to_string(),
        role: Role::Supplier,
    };
    let user = session.register(&request).await.unwrap();

    assert_eq!(user.role, Role::Supplier);
    assert!(!session.view().is_signed_in());
    assert_eq!(storage.peek(KEY), None);

    session.teardown().await.unwrap();
}
