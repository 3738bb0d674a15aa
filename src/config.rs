//! Application configuration for linkboard.
//!
//! Stored as a JSON file at the platform-specific config path. A missing
//! file yields the defaults; a malformed file is an error so a typo never
//! silently reverts every setting.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform;

/// Embedded placeholder used when a page yields no preview image, and as the
/// render-time fallback when an image fails to load.
pub const FALLBACK_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSIxMDAlIiBoZWlnaHQ9IjEwMCUiIHZpZXdCb3g9IjAgMCAxIDEiPjxyZWN0IHdpZHRoPSIxIiBoZWlnaHQ9IjEiIGZpbGw9IiMzMzMiLz48L3N2Zz4=";

/// Storage key holding the persisted cache collection.
pub const CACHE_KEY: &str = "bookmark_cache";

/// Storage key holding the persisted view-mode choice.
pub const VIEW_KEY: &str = "bookmark_view";

fn default_links_path() -> String {
    "links.txt".to_string()
}

fn default_output_path() -> String {
    "bookmarks.html".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    5_000
}

fn default_cache_expiry_ms() -> i64 {
    7 * 24 * 60 * 60 * 1000
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

/// Runtime configuration, all fields optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Newline-delimited URL list to load.
    #[serde(default = "default_links_path")]
    pub links_path: String,
    /// Where the rendered HTML document is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// Key-value store file. Defaults to `storage.json` in the platform data dir.
    #[serde(default)]
    pub storage_path: Option<String>,
    /// Deadline for one page retrieval, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Cache entry lifetime, in milliseconds.
    #[serde(default = "default_cache_expiry_ms")]
    pub cache_expiry_ms: i64,
    /// Delay applied to search input before re-rendering, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// User-Agent header sent with page retrievals.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            links_path: default_links_path(),
            output_path: default_output_path(),
            storage_path: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            cache_expiry_ms: default_cache_expiry_ms(),
            debounce_ms: default_debounce_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Default location of the config file: `config.json` in the platform
    /// config directory.
    pub fn default_path() -> PathBuf {
        platform::get_config_dir().join("config.json")
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file returns the defaults. A file that exists but does not
    /// parse is an error.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Resolved path of the key-value store file.
    pub fn storage_file(&self) -> PathBuf {
        match &self.storage_path {
            Some(path) => PathBuf::from(path),
            None => platform::get_data_dir().join("storage.json"),
        }
    }
}
