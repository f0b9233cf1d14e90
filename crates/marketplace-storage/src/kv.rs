//! Key-Value store trait and typed wrapper with automatic serialization.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::StorageError;

/// Raw string key-value store.
///
/// Mirrors the device storage API the cart was written against: values are
/// opaque strings, a missing key reads as `None`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key).await
    }
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A value that exists but does
    /// not deserialize as `T` is a [`StorageError::Serialization`].
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get_item(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Get the raw string stored under `key`.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store.get_item(key).await
    }

    /// Set a value in the cache.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(key, raw).await
    }

    /// Delete a value from the cache.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove_item(key).await
    }

    /// Check if a key exists in the cache.
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.store.get_item(key).await?.is_some())
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```
/// let key = marketplace_storage::cache_key!("@Gomarketplace", "cart");
/// assert_eq!(key, "@Gomarketplace:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::MemoryStore;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "user123"), "cart:user123");
        assert_eq!(cache_key!("a", 1, "b"), "a:1:b");
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let entries = vec![Entry {
            id: "a".to_string(),
            quantity: 2,
        }];

        cache.set("k", &entries).await.unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("k").await.unwrap();

        assert_eq!(loaded, Some(entries));
        assert_eq!(
            cache.get_raw("k").await.unwrap().as_deref(),
            Some(r#"[{"id":"a","quantity":2}]"#)
        );
    }

    #[tokio::test]
    async fn test_missing_key() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Vec<Entry>> = cache.get("nope").await.unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_value_is_serialization_error() {
        let store = MemoryStore::new();
        store.set_item("k", "{not json".to_string()).await.unwrap();

        let cache = Cache::new(store);
        let result: Result<Option<Vec<Entry>>, _> = cache.get("k").await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("k", &1u32).await.unwrap();
        cache.delete("k").await.unwrap();
        assert!(!cache.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(Arc::clone(&store));
        cache.set("k", &"v").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("\"v\""));
    }
}
