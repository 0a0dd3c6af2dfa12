//! File-backed store behavior against a real directory.

use brms_storage::{FileStore, KvStore, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: String,
    full_name: String,
}

fn user() -> User {
    User {
        id: "user-1".to_string(),
        full_name: "Aline Uwase".to_string(),
    }
}

#[test]
fn missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("state.json"));

    assert!(store.keys().unwrap().is_empty());
    assert_eq!(store.get::<User>("brms_user").unwrap(), None);
    assert!(!store.delete("brms_user").unwrap());
    assert!(!store.path().exists());
}

#[test]
fn writes_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    FileStore::open(&path).set("brms_user", &user()).unwrap();

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get::<User>("brms_user").unwrap(), Some(user()));

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["brms_user"]["fullName"], "Aline Uwase");
}

#[test]
fn delete_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("state.json"));
    store.set("brms_user", &user()).unwrap();
    store.set("theme", &"dark").unwrap();

    assert!(store.delete("brms_user").unwrap());
    assert_eq!(store.keys().unwrap(), vec!["theme"]);
    assert!(!FileStore::open(store.path()).exists("brms_user").unwrap());
}

#[test]
fn non_object_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let store = FileStore::open(&path);
    assert!(matches!(store.keys(), Err(StorageError::Corrupt { .. })));
    assert!(matches!(
        store.set("theme", &"dark"),
        Err(StorageError::Corrupt { .. })
    ));
}
