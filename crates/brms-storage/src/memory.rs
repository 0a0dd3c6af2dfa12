//! In-memory backend.

use crate::{KvStore, StorageError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-local store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_value(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Table {
        number: u32,
        seats: u32,
    }

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("table:4", &Table { number: 4, seats: 6 }).unwrap();
        let table: Option<Table> = store.get("table:4").unwrap();
        assert_eq!(table, Some(Table { number: 4, seats: 6 }));

        assert!(store.delete("table:4").unwrap());
        assert!(!store.delete("table:4").unwrap());
        assert_eq!(store.get::<Table>("table:4").unwrap(), None);
    }

    #[test]
    fn test_keys_are_sorted() {
        let store = MemoryStore::new();
        store.set("b", &1).unwrap();
        store.set("a", &2).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_require_missing_key() {
        let store = MemoryStore::new();
        let err = store.require::<Table>("nope").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(key) if key == "nope"));
    }

    #[test]
    fn test_wrong_shape_is_serialize_error() {
        let store = MemoryStore::new();
        store.set("table:1", &"not a table").unwrap();
        assert!(matches!(
            store.get::<Table>("table:1"),
            Err(StorageError::Serialize(_))
        ));
    }

    #[test]
    fn test_poisoned_lock_keeps_count() {
        let store = std::sync::Arc::new(MemoryStore::new());
        store.set("table:1", &1).unwrap();

        let handle = std::sync::Arc::clone(&store);
        let poisoner = std::thread::spawn(move || {
            let _guard = handle.entries.write().unwrap();
            panic!("poison the store");
        });
        assert!(poisoner.join().is_err());

        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
