//! Key-value persistence collaborator.
//!
//! The cache collection and the view-mode preference are both stored under
//! fixed keys in a `KeyValueStore`. The default implementation keeps all
//! keys in one JSON file; `MemoryStore` backs tests.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::types::errors::CacheError;

/// String key-value store addressed by fixed keys.
///
/// Reads are tolerant by contract: an absent or unreadable value is simply
/// `None`. Only writes and removals can fail.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// Store persisting all keys as a single JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the whole map. Absent or malformed files load as empty.
    fn read_map(&self) -> HashMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "discarding malformed store file: {}",
                    err
                );
                HashMap::new()
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CacheError::Io(format!("Failed to create store directory: {}", e)))?;
        }
        let json = serde_json::to_string(map)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| CacheError::Io(format!("Failed to write store file: {}", e)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
