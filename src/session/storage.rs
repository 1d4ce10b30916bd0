use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CollabError, CollabResult};
use crate::logging::log_error;

/// Durable string key-value storage scoped to one installation.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> CollabResult<()>;
    fn remove_item(&self, key: &str) -> CollabResult<()>;
}

/// A JSON object on disk. Every read goes to the file so callers always see
/// the latest write, including ones made by another process.
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> HashMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log_error(&format!("Ignoring unreadable storage file {}: {}", self.path.display(), e));
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> CollabResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| CollabError::StorageError(format!("{} has no parent directory", self.path.display())))?;
        fs::create_dir_all(dir)?;

        // Atomic replace via rename
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(map)?.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| CollabError::StorageError(e.to_string()))?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> CollabResult<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CollabError::StorageError("storage lock poisoned".to_string()))?;
        let mut map = self.read_map();
        f(&mut map);
        self.write_map(&map)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> CollabResult<()> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> CollabResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(key);
        })
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> CollabResult<()> {
        self.items
            .lock()
            .map_err(|_| CollabError::StorageError("storage lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CollabResult<()> {
        self.items
            .lock()
            .map_err(|_| CollabError::StorageError("storage lock poisoned".to_string()))?
            .remove(key);
        Ok(())
    }
}
