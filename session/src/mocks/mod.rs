//! Mock implementations of session providers for testing.
//!
//! These mocks keep everything in memory and can be scripted to fail, so the
//! session flow can be exercised without an identity service or backend.

pub mod identity;
pub mod verifier;

pub use identity::MockIdentityProvider;
pub use verifier::MockVerifier;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock ignoring poisoning; a panicking test thread must not wedge the mock.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
