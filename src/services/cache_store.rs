//! Persisted bookmark cache.
//!
//! One JSON array of `CacheEntry` lives under the fixed `bookmark_cache`
//! storage key. The pipeline reads the collection once per run and rewrites
//! it whole at the end; there is no incremental patching.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::CACHE_KEY;
use crate::services::storage::KeyValueStore;
use crate::types::bookmark::CacheEntry;
use crate::types::errors::CacheError;

/// Cache collection access over a shared key-value store.
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
    expiry_ms: i64,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>, expiry_ms: i64) -> Self {
        Self { store, expiry_ms }
    }

    /// Current time in milliseconds since the Unix epoch.
    pub fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Reads the persisted collection. Absent or malformed data loads as an
    /// empty collection, never as an error.
    pub fn load(&self) -> Vec<CacheEntry> {
        let Some(raw) = self.store.get(CACHE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("discarding malformed bookmark cache: {}", err);
                Vec::new()
            }
        }
    }

    /// Whether the entry is still inside the expiry window.
    pub fn is_fresh(&self, entry: &CacheEntry) -> bool {
        Self::now_ms() - entry.timestamp < self.expiry_ms
    }

    /// Exact-URL lookup within a loaded collection.
    pub fn find_by_url<'a>(entries: &'a [CacheEntry], url: &str) -> Option<&'a CacheEntry> {
        entries.iter().find(|entry| entry.url == url)
    }

    /// Overwrites the entire persisted collection.
    pub fn replace_all(&self, entries: &[CacheEntry]) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(entries).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.store.set(CACHE_KEY, &json)
    }

    /// Removes the persisted collection entirely.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(CACHE_KEY)
    }
}
