//! Bookmark Pipeline for linkboard.
//!
//! Orchestrates one run: validate the URL list, consult the cache, fetch and
//! extract metadata for misses, synthesize fallback records for failures,
//! and rewrite the persisted cache. Fails soft per URL: only an empty or
//! unreadable list aborts a run.

use std::sync::Arc;

use url::Url;

use crate::config::FALLBACK_IMAGE;
use crate::services::cache_store::CacheStore;
use crate::services::metadata_extractor;
use crate::services::page_fetcher::PageFetcherTrait;
use crate::services::sanitizer::sanitize;
use crate::services::url_validator;
use crate::types::bookmark::{Bookmark, CacheEntry, RawMetadata};
use crate::types::errors::PipelineError;

/// Pipeline over the network and cache collaborators.
pub struct BookmarkPipeline {
    fetcher: Arc<dyn PageFetcherTrait>,
    cache: CacheStore,
}

impl BookmarkPipeline {
    pub fn new(fetcher: Arc<dyn PageFetcherTrait>, cache: CacheStore) -> Self {
        Self { fetcher, cache }
    }

    /// Runs the pipeline over a newline-delimited URL list.
    ///
    /// Returns one bookmark per surviving URL, in input order. Per-URL
    /// failures yield fallback records and never abort the run; the whole
    /// cache collection is rewritten at the end with run-time timestamps,
    /// fallback records included.
    pub async fn run(&self, url_list_text: &str) -> Result<Vec<Bookmark>, PipelineError> {
        let urls = parse_url_list(url_list_text);
        if urls.is_empty() {
            return Err(PipelineError::NoValidUrls);
        }

        // One cache read per run; every lookup below works on this snapshot.
        let cached = self.cache.load();

        let mut handles = Vec::with_capacity(urls.len());
        for url in &urls {
            let fresh = CacheStore::find_by_url(&cached, url.as_str())
                .filter(|entry| self.cache.is_fresh(entry))
                .map(|entry| entry.data.clone());
            let fetcher = Arc::clone(&self.fetcher);
            let url = url.clone();

            handles.push(tokio::spawn(async move {
                match fresh {
                    Some(bookmark) => {
                        tracing::debug!(url = %url, "using cached data");
                        bookmark
                    }
                    None => {
                        tracing::debug!(url = %url, "fetching new or expired data");
                        process_url(fetcher.as_ref(), &url).await
                    }
                }
            }));
        }

        // Collect strictly in input order, whatever the completion order.
        let mut bookmarks = Vec::with_capacity(urls.len());
        for (handle, url) in handles.into_iter().zip(&urls) {
            match handle.await {
                Ok(bookmark) => bookmarks.push(bookmark),
                Err(err) => {
                    tracing::error!(url = %url, "bookmark task failed: {}", err);
                    bookmarks.push(fallback_bookmark(url));
                }
            }
        }

        let now = CacheStore::now_ms();
        let entries: Vec<CacheEntry> = urls
            .iter()
            .zip(&bookmarks)
            .map(|(url, bookmark)| CacheEntry {
                url: url.as_str().to_string(),
                timestamp: now,
                data: bookmark.clone(),
            })
            .collect();
        if let Err(err) = self.cache.replace_all(&entries) {
            // Losing the cache is strictly less bad than losing the run.
            tracing::error!("failed to persist bookmark cache: {}", err);
        }

        if bookmarks.is_empty() {
            return Err(PipelineError::EmptyResult);
        }
        Ok(bookmarks)
    }
}

/// Splits the list into validated URLs, preserving input order. Each dropped
/// line is logged as a warning.
fn parse_url_list(url_list_text: &str) -> Vec<Url> {
    url_list_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match url_validator::parse(line) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!("skipping URL list entry: {}", err);
                None
            }
        })
        .collect()
}

/// Fetches and extracts one URL, converting any failure into a visible
/// error notice plus a fallback record.
async fn process_url(fetcher: &dyn PageFetcherTrait, url: &Url) -> Bookmark {
    let outcome = match fetcher.fetch_page(url).await {
        Ok(html) => metadata_extractor::extract(&html, url).map_err(|e| e.to_string()),
        Err(err) => Err(err.to_string()),
    };

    match outcome {
        Ok(meta) => build_bookmark(meta, url),
        Err(notice) => {
            tracing::error!(url = %url, "failed to load preview: {}", notice);
            fallback_bookmark(url)
        }
    }
}

/// Builds a bookmark from extracted metadata, filling absent fields from
/// hostname-derived fallbacks.
pub fn build_bookmark(meta: RawMetadata, url: &Url) -> Bookmark {
    let host = url_validator::hostname(url);
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    let title = non_empty(meta.title.clone()).unwrap_or_else(|| host.clone());
    let short_description = non_empty(meta.short_description)
        .or_else(|| non_empty(meta.title))
        .unwrap_or_else(|| format!("Visit {}", host));
    let long_description =
        non_empty(meta.long_description).unwrap_or_else(|| format!("Explore more at {}", host));
    let preview = non_empty(meta.image).unwrap_or_else(|| FALLBACK_IMAGE.to_string());

    Bookmark {
        title: sanitize(Some(&title)),
        short_description: sanitize(Some(&short_description)),
        long_description: sanitize(Some(&long_description)),
        preview,
        link: url.as_str().to_string(),
        domain: url_validator::domain(url),
    }
}

/// Minimal record derived from the hostname alone, used when retrieval or
/// extraction fails.
pub fn fallback_bookmark(url: &Url) -> Bookmark {
    let host = url_validator::hostname(url);
    Bookmark {
        title: host.clone(),
        short_description: format!("Visit {}", host),
        long_description: format!("Explore more at {}", host),
        preview: FALLBACK_IMAGE.to_string(),
        link: url.as_str().to_string(),
        domain: url_validator::domain(url),
    }
}
