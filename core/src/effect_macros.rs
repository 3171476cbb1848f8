//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants, particularly
//! for async calls to collaborators and durable storage writes.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use eventmarketplace_core::async_effect;
///
/// async_effect! {
///     match verifier.verify(&token).await {
///         Ok(user) => Some(SessionAction::VerificationSucceeded { token, user }),
///         Err(error) => Some(SessionAction::VerificationFailed { token, reason: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Storage` that stores a value
///
/// # Example
///
/// ```rust,ignore
/// use eventmarketplace_core::store_value;
///
/// store_value! {
///     storage: env.storage,
///     key: "firebaseToken",
///     value: token.as_str()
/// }
/// ```
#[macro_export]
macro_rules! store_value {
    (
        storage: $storage:expr,
        key: $key:expr,
        value: $value:expr
    ) => {
        $crate::effect::Effect::Storage($crate::storage::StorageOperation::Set {
            storage: ::std::sync::Arc::clone(&$storage),
            key: $key.to_string(),
            value: $value.to_string(),
        })
    };
}

/// Create an `Effect::Storage` that removes a value
///
/// # Example
///
/// ```rust,ignore
/// use eventmarketplace_core::remove_value;
///
/// remove_value! {
///     storage: env.storage,
///     key: "firebaseToken"
/// }
/// ```
#[macro_export]
macro_rules! remove_value {
    (
        storage: $storage:expr,
        key: $key:expr
    ) => {
        $crate::effect::Effect::Storage($crate::storage::StorageOperation::Remove {
            storage: ::std::sync::Arc::clone(&$storage),
            key: $key.to_string(),
        })
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use crate::storage::{KeyValueStorage, StorageError};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    enum TestAction {
        AsyncResult { value: i32 },
    }

    struct NullStorage;

    impl KeyValueStorage for NullStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_storage_macros() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(NullStorage);

        let set: Effect<TestAction> = store_value! {
            storage: storage,
            key: "firebaseToken",
            value: "tok"
        };
        let op = set.as_storage();
        assert_eq!(op.map(|op| op.key()), Some("firebaseToken"));
        assert_eq!(op.and_then(|op| op.value()), Some("tok"));

        let remove: Effect<TestAction> = remove_value! {
            storage: storage,
            key: "firebaseToken"
        };
        assert_eq!(remove.as_storage().and_then(|op| op.value()), None);
    }
}
