//! # Event Marketplace Session
//!
//! Client-side session core of the event marketplace: who is signed in,
//! whether the backend has confirmed it, and which views they may open.
//!
//! ## Architecture
//!
//! ```text
//!  IdentityProvider ── identity changes ──▶ SessionClient ──▶ Store<SessionReducer>
//!                                                │                 │
//!                                   view() / watch() / guard()     ├─▶ KeyValueStorage (token)
//!                                                                  └─▶ BackendVerifier
//! ```
//!
//! - [`reducer::SessionReducer`]: every session transition, as a reducer
//! - [`client::SessionClient`]: lifecycle (bootstrap/teardown) and the
//!   operations the presentation layer calls
//! - [`guard`]: pure route guard over the session view
//! - [`routes`]: the application routes, their access policy and the
//!   per-role landing pages
//! - [`providers`]: identity provider and backend verifier traits, and the
//!   identity toolkit implementation
//! - [`storage::FileStorage`]: durable token storage
//!
//! ## Example
//!
//! ```no_run
//! use eventmarketplace_session::{ClientConfig, SessionClient, routes::Route};
//!
//! #[tokio::main]
//! async fn main() -> eventmarketplace_session::Result<()> {
//!     eventmarketplace_session::init_tracing();
//!
//!     let config = ClientConfig::from_env()?;
//!     let session = SessionClient::connect(&config).await?;
//!
//!     let view = session.ready().await?;
//!     println!("signed in: {}", view.is_signed_in());
//!     println!("dashboard: {:?}", session.guard(&Route::OrganizerDashboard));
//!
//!     session.teardown().await
//! }
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod guard;
pub mod providers;
pub mod reducer;
pub mod routes;
pub mod state;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::SessionAction;
pub use client::{SessionClient, SessionWatch};
pub use config::{ClientConfig, IdentityConfig, SessionConfig};
pub use environment::SessionEnvironment;
pub use error::{Result, SessionError};
pub use guard::{GuardDecision, Redirect, RoleSet, evaluate};
pub use providers::{BackendVerifier, IdentityProvider, ToolkitIdentityProvider};
pub use reducer::SessionReducer;
pub use routes::{Access, Route, landing_route};
pub use state::{IdentityRecord, SessionState, SessionView};
pub use storage::FileStorage;

/// Install a `tracing` subscriber for applications.
///
/// Honors `RUST_LOG` (default `info`). Does nothing if a global subscriber
/// is already installed.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();
}
