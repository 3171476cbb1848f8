//! Durable client-side key/value storage.
//!
//! The client keeps a very small amount of state across restarts (the last
//! known bearer token). Storage backends implement [`KeyValueStorage`];
//! reducers never call them directly but describe writes as
//! [`StorageOperation`]s wrapped in [`Effect::Storage`](crate::effect::Effect::Storage).

use std::sync::Arc;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// Stored data could not be decoded.
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Synchronous string key/value storage.
///
/// The store applies storage effects inline, on an async worker and while
/// holding the state write lock. Implementations must be cheap enough for
/// that: in-memory maps or a small local file. Slower backends need to move
/// their I/O off the async workers (e.g. `tokio::task::spawn_blocking`)
/// behind a different effect.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// A pending write against a [`KeyValueStorage`].
pub enum StorageOperation {
    /// Store a value.
    Set {
        /// Target storage
        storage: Arc<dyn KeyValueStorage>,
        /// Key to write
        key: String,
        /// Value to store
        value: String,
    },

    /// Remove a value.
    Remove {
        /// Target storage
        storage: Arc<dyn KeyValueStorage>,
        /// Key to remove
        key: String,
    },
}

impl StorageOperation {
    /// Key this operation touches.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key, .. } => key,
        }
    }

    /// Value written by this operation, `None` for removals.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Set { value, .. } => Some(value),
            Self::Remove { .. } => None,
        }
    }

    /// Apply the operation to its storage.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`StorageError`].
    pub fn execute(self) -> Result<(), StorageError> {
        match self {
            Self::Set {
                storage,
                key,
                value,
            } => storage.set(&key, &value),
            Self::Remove { storage, key } => storage.remove(&key),
        }
    }
}

// Values are credentials; only their length is printed.
impl std::fmt::Debug for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set { key, value, .. } => f
                .debug_struct("StorageOperation::Set")
                .field("key", key)
                .field("value_len", &value.len())
                .finish_non_exhaustive(),
            Self::Remove { key, .. } => f
                .debug_struct("StorageOperation::Remove")
                .field("key", key)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStorage(Mutex<HashMap<String, String>>);

    impl KeyValueStorage for MapStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let map = self.0.lock().map_err(|e| StorageError::Io(e.to_string()))?;
            Ok(map.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let mut map = self.0.lock().map_err(|e| StorageError::Io(e.to_string()))?;
            map.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            let mut map = self.0.lock().map_err(|e| StorageError::Io(e.to_string()))?;
            map.remove(key);
            Ok(())
        }
    }

    #[test]
    fn test_set_then_remove() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MapStorage::default());

        let set = StorageOperation::Set {
            storage: Arc::clone(&storage),
            key: "token".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(set.key(), "token");
        assert_eq!(set.value(), Some("abc"));
        assert!(set.execute().is_ok());
        assert_eq!(storage.get("token"), Ok(Some("abc".to_string())));

        let remove = StorageOperation::Remove {
            storage: Arc::clone(&storage),
            key: "token".to_string(),
        };
        assert_eq!(remove.value(), None);
        assert!(remove.execute().is_ok());
        assert_eq!(storage.get("token"), Ok(None));
    }

    #[test]
    fn test_debug_redacts_value() {
        let op = StorageOperation::Set {
            storage: Arc::new(MapStorage::default()),
            key: "token".to_string(),
            value: "secret-token".to_string(),
        };
        let printed = format!("{op:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("value_len"));
    }
}
