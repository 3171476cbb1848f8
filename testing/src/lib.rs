//! # Event Marketplace Testing
//!
//! Testing utilities and helpers for the event marketplace client.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use eventmarketplace_testing::{InMemoryStorage, ReducerTest};
//!
//! ReducerTest::new(SessionReducer::new())
//!     .with_env(test_environment())
//!     .given_state(SessionState::restoring(None))
//!     .when_action(SessionAction::Bootstrap)
//!     .then_state(|state| assert!(!state.loading))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use eventmarketplace_core::environment::Clock;


/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use eventmarketplace_core::storage::{KeyValueStorage, StorageError};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventmarketplace_testing::mocks::FixedClock;
    /// use eventmarketplace_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// In-memory key/value storage
    ///
    /// Clones share the same map, so a test can keep a handle and inspect
    /// what the store persisted. Every write is also appended to a log.
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryStorage {
        values: Arc<Mutex<HashMap<String, String>>>,
        writes: Arc<Mutex<Vec<(String, Option<String>)>>>,
    }

    impl InMemoryStorage {
        /// Create empty storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create storage pre-populated with one entry
        #[must_use]
        pub fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::new();
            if let Ok(mut values) = storage.values.lock() {
                values.insert(key.to_string(), value.to_string());
            }
            storage
        }

        /// Current value for `key`, ignoring lock poisoning
        #[must_use]
        pub fn peek(&self, key: &str) -> Option<String> {
            self.values
                .lock()
                .ok()
                .and_then(|values| values.get(key).cloned())
        }

        /// All writes so far, in order; removals are recorded as `None`
        #[must_use]
        pub fn writes(&self) -> Vec<(String, Option<String>)> {
            self.writes
                .lock()
                .map(|writes| writes.clone())
                .unwrap_or_default()
        }

        fn record(&self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
            self.writes
                .lock()
                .map_err(|e| StorageError::Io(e.to_string()))?
                .push((key.to_string(), value.map(str::to_string)));
            Ok(())
        }
    }

    impl KeyValueStorage for InMemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let values = self.values.lock().map_err(|e| StorageError::Io(e.to_string()))?;
            Ok(values.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values
                .lock()
                .map_err(|e| StorageError::Io(e.to_string()))?
                .insert(key.to_string(), value.to_string());
            self.record(key, Some(value))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.values
                .lock()
                .map_err(|e| StorageError::Io(e.to_string()))?
                .remove(key);
            self.record(key, None)
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a test-friendly tracing subscriber
    ///
    /// Honors `RUST_LOG`, writes through the test harness's captured output
    /// and is safe to call from every test.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, InMemoryStorage, test_clock};
pub use reducer_test::{ReducerTest, assertions};
