use std::sync::Arc;
use serde_json::json;
use tempfile::TempDir;

use crate::models::UserProfile;
use crate::session::{FileStorage, MemoryStorage, SessionStore, Storage};

fn user() -> UserProfile {
    serde_json::from_value(json!({ "_id": "u1", "name": "Ada", "email": "ada@example.com" })).unwrap()
}

#[test]
fn test_session_store_round_trip_in_memory() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone());

    store.save(Some("tok"), Some(&user())).unwrap();
    let session = store.load();
    assert_eq!(session.token.as_deref(), Some("tok"));
    assert_eq!(session.user, Some(user()));
    assert_eq!(storage.len(), 2);

    store.clear().unwrap();
    assert!(store.load().is_empty());
    assert!(storage.is_empty());
}

#[test]
fn test_save_only_writes_present_parts() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    store.save(Some("first"), Some(&user())).unwrap();

    store.save(Some("second"), None).unwrap();
    let session = store.load();
    assert_eq!(session.token.as_deref(), Some("second"));
    assert_eq!(session.user, Some(user()));
}

#[test]
fn test_corrupt_user_entry_loads_as_none() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set_item("auth_token", "tok").unwrap();
    storage.set_item("auth_user", "{not json").unwrap();

    let session = SessionStore::new(storage).load();
    assert_eq!(session.token.as_deref(), Some("tok"));
    assert!(session.user.is_none());
}

#[test]
fn test_file_storage_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let storage = FileStorage::new(&path);
    assert_eq!(storage.get_item("auth_token"), None);
    storage.set_item("auth_token", "tok").unwrap();
    storage.set_item("theme", "dark").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get_item("auth_token").as_deref(), Some("tok"));

    reopened.remove_item("auth_token").unwrap();
    assert_eq!(storage.get_item("auth_token"), None);
    assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
}

#[test]
fn test_file_storage_remove_without_file_is_noop() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    storage.remove_item("auth_token").unwrap();
    assert!(!storage.path().exists());
}
