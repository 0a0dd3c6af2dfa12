//! File backend: one JSON object on disk.

use crate::{KvStore, StorageError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Store persisted as a single JSON object, one property per key.
///
/// The file is read on every access and rewritten on every mutation, so
/// several processes see each other's writes. A missing file is an empty
/// store; it is created on the first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`. Nothing is read or created yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                reason: "top-level value is not an object".to_string(),
            }),
            Err(e) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        // Write beside the target and rename so readers never see half a file.
        let tmp = self.path.with_extension("tmp");
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&tmp, content).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), keys = map.len(), "store saved");
        Ok(())
    }

    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Map<String, Value>) -> R,
    ) -> Result<R, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut map = self.load()?;
        let result = f(&mut map);
        self.save(&map)?;
        Ok(result)
    }
}

impl KvStore for FileStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_value(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.mutate(|map| {
            map.insert(key.to_string(), value);
        })
    }

    fn delete(&self, key: &str) -> Result<bool, StorageError> {
        if !self.exists(key)? {
            return Ok(false);
        }
        self.mutate(|map| map.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.load()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load()?.contains_key(key))
    }
}
