//! Key-value store trait with automatic serialization.

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A string-keyed store of JSON values.
///
/// Backends implement the untyped `*_value` methods; callers use the typed
/// [`get`](KvStore::get) and [`set`](KvStore::set), which work for any type
/// that implements `Serialize` and `DeserializeOwned`.
pub trait KvStore: Send + Sync {
    /// Read the raw JSON stored under `key`.
    fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the raw JSON stored under `key`.
    fn set_value(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Delete a key. Returns `true` if it was present.
    fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_value(key)?.is_some())
    }

    /// Get a value. Returns `None` if the key doesn't exist.
    ///
    /// ```rust,ignore
    /// let user: Option<StoredUser> = store.get("brms_user")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        match self.get_value(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Get a value that must exist.
    fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, StorageError>
    where
        Self: Sized,
    {
        self.get(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    /// Set a value.
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        self.set_value(key, serde_json::to_value(value)?)
    }
}
