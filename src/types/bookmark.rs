use serde::{Deserialize, Serialize};

/// A derived preview record for one source URL.
///
/// Immutable once produced: every field is non-empty. When extraction fails
/// entirely, the fields carry deterministic hostname-derived strings and the
/// constant fallback image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    /// Preview image URI, or the fallback placeholder.
    pub preview: String,
    /// The source URL. Unique within a run.
    pub link: String,
    /// Hostname with a leading "www." stripped.
    pub domain: String,
}

/// One persisted cache record: a bookmark plus the time it was written.
///
/// An entry is fresh while `now - timestamp` stays below the configured
/// expiry. Every pipeline run rewrites the whole collection with run-time
/// timestamps, so an entry only expires when no run touches the cache for
/// the full expiry window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub data: Bookmark,
}

/// Raw extractor output, before conversion into a `Bookmark`.
///
/// Transient: never persisted. Absent fields are filled from
/// hostname-derived fallbacks when the bookmark is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub image: Option<String>,
}
