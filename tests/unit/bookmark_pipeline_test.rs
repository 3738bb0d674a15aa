//! Unit tests for the BookmarkPipeline.
//!
//! The network collaborator is replaced with a scripted fetcher that records
//! every invocation, so cache behavior and fallback synthesis can be
//! asserted without touching the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use linkboard::config::FALLBACK_IMAGE;
use linkboard::managers::bookmark_pipeline::BookmarkPipeline;
use linkboard::services::cache_store::CacheStore;
use linkboard::services::page_fetcher::PageFetcherTrait;
use linkboard::services::storage::MemoryStore;
use linkboard::types::bookmark::{Bookmark, CacheEntry};
use linkboard::types::errors::{FetchError, PipelineError};

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Scripted response for one URL.
enum Scripted {
    Html(String),
    Status(u16),
    Timeout,
}

/// Fetcher double that serves scripted responses and records every call.
struct ScriptedFetcher {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<(&str, Scripted)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(url, scripted)| (url.to_string(), scripted))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcherTrait for ScriptedFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.as_str().to_string());
        match self.responses.get(url.as_str()) {
            Some(Scripted::Html(html)) => Ok(html.clone()),
            Some(Scripted::Status(code)) => Err(FetchError::Status(*code)),
            Some(Scripted::Timeout) => Err(FetchError::Timeout(5_000)),
            None => Err(FetchError::Transport("no scripted response".to_string())),
        }
    }
}

fn page(title: &str) -> Scripted {
    Scripted::Html(format!(
        "<html><head><title>{}</title></head><body></body></html>",
        title
    ))
}

fn setup(
    responses: Vec<(&str, Scripted)>,
) -> (BookmarkPipeline, Arc<ScriptedFetcher>, CacheStore) {
    let fetcher = Arc::new(ScriptedFetcher::new(responses));
    let cache = CacheStore::new(Arc::new(MemoryStore::new()), WEEK_MS);
    let pipeline = BookmarkPipeline::new(fetcher.clone(), cache.clone());
    (pipeline, fetcher, cache)
}

fn cached_bookmark(title: &str, link: &str) -> Bookmark {
    Bookmark {
        title: title.to_string(),
        short_description: format!("Visit {}", title),
        long_description: format!("Explore more at {}", title),
        preview: "https://example.com/cached.png".to_string(),
        link: link.to_string(),
        domain: "example.com".to_string(),
    }
}

#[tokio::test]
async fn test_run_yields_one_bookmark_per_valid_url_in_input_order() {
    let (pipeline, fetcher, _cache) = setup(vec![
        ("https://example.com/b", page("Bravo")),
        ("https://example.com/a", page("Alpha")),
        ("https://example.com/c", page("Charlie")),
    ]);

    let list = "https://example.com/b\nhttps://example.com/a\nhttps://example.com/c\n";
    let bookmarks = pipeline.run(list).await.unwrap();

    let titles: Vec<&str> = bookmarks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Bravo", "Alpha", "Charlie"]);
    let links: Vec<&str> = bookmarks.iter().map(|b| b.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://example.com/b",
            "https://example.com/a",
            "https://example.com/c"
        ]
    );
    assert_eq!(fetcher.call_count(), 3);
}

#[tokio::test]
async fn test_invalid_and_blank_lines_are_dropped() {
    let (pipeline, fetcher, _cache) = setup(vec![("https://example.com/ok", page("Ok"))]);

    let list = "\n   \nnot a url\nhttps://example.com/ok\nftp-ish nonsense\n";
    let bookmarks = pipeline.run(list).await.unwrap();

    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].title, "Ok");
    assert_eq!(fetcher.calls(), vec!["https://example.com/ok"]);
}

#[tokio::test]
async fn test_run_fails_fast_when_no_valid_urls_survive() {
    let (pipeline, fetcher, _cache) = setup(vec![]);

    let result = pipeline.run("not a url\n\nanother bad line").await;
    assert!(matches!(result, Err(PipelineError::NoValidUrls)));
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_fresh_cache_hit_reuses_stored_bookmark_without_fetching() {
    let (pipeline, fetcher, cache) = setup(vec![]);
    let stored = cached_bookmark("Cached Title", "https://example.com/hit");
    cache
        .replace_all(&[CacheEntry {
            url: "https://example.com/hit".to_string(),
            timestamp: CacheStore::now_ms(),
            data: stored.clone(),
        }])
        .unwrap();

    let bookmarks = pipeline.run("https://example.com/hit").await.unwrap();

    assert_eq!(bookmarks, vec![stored]);
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_expired_entry_is_refetched_exactly_once() {
    let (pipeline, fetcher, cache) = setup(vec![("https://example.com/stale", page("New Title"))]);
    cache
        .replace_all(&[CacheEntry {
            url: "https://example.com/stale".to_string(),
            timestamp: CacheStore::now_ms() - WEEK_MS - 60_000,
            data: cached_bookmark("Old Title", "https://example.com/stale"),
        }])
        .unwrap();

    let bookmarks = pipeline.run("https://example.com/stale").await.unwrap();

    assert_eq!(bookmarks[0].title, "New Title");
    assert_eq!(fetcher.calls(), vec!["https://example.com/stale"]);
}

#[tokio::test]
async fn test_timeout_yields_hostname_fallback_record() {
    let (pipeline, _fetcher, _cache) =
        setup(vec![("https://slow.example.org/page", Scripted::Timeout)]);

    let bookmarks = pipeline.run("https://slow.example.org/page").await.unwrap();

    assert_eq!(bookmarks.len(), 1);
    let fallback = &bookmarks[0];
    assert_eq!(fallback.title, "slow.example.org");
    assert_eq!(fallback.short_description, "Visit slow.example.org");
    assert_eq!(fallback.long_description, "Explore more at slow.example.org");
    assert_eq!(fallback.preview, FALLBACK_IMAGE);
    assert_eq!(fallback.domain, "slow.example.org");
}

#[tokio::test]
async fn test_one_failure_never_aborts_the_run() {
    let (pipeline, _fetcher, _cache) = setup(vec![
        ("https://example.com/good", page("Good")),
        ("https://example.com/bad", Scripted::Status(500)),
        ("https://example.com/also-good", page("Also Good")),
    ]);

    let list = "https://example.com/good\nhttps://example.com/bad\nhttps://example.com/also-good";
    let bookmarks = pipeline.run(list).await.unwrap();

    assert_eq!(bookmarks.len(), 3);
    assert_eq!(bookmarks[0].title, "Good");
    assert_eq!(bookmarks[1].title, "example.com");
    assert_eq!(bookmarks[1].preview, FALLBACK_IMAGE);
    assert_eq!(bookmarks[2].title, "Also Good");
}

#[tokio::test]
async fn test_domain_strips_leading_www() {
    let (pipeline, _fetcher, _cache) =
        setup(vec![("https://www.example.com/page", page("Page"))]);

    let bookmarks = pipeline.run("https://www.example.com/page").await.unwrap();
    assert_eq!(bookmarks[0].domain, "example.com");
}

#[tokio::test]
async fn test_cache_is_rewritten_with_fresh_timestamps_for_every_url() {
    let (pipeline, _fetcher, cache) = setup(vec![
        ("https://example.com/a", page("A")),
        ("https://example.com/b", Scripted::Status(404)),
    ]);

    let before = CacheStore::now_ms();
    pipeline
        .run("https://example.com/a\nhttps://example.com/b")
        .await
        .unwrap();

    let entries = cache.load();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert!(entry.timestamp >= before);
        assert!(cache.is_fresh(entry));
    }
    // Fallback records are cached too, so failures are not retried until
    // the entry expires.
    let failed = CacheStore::find_by_url(&entries, "https://example.com/b").unwrap();
    assert_eq!(failed.data.preview, FALLBACK_IMAGE);
}

#[tokio::test]
async fn test_cache_hits_are_rewritten_with_refreshed_timestamps() {
    let (pipeline, fetcher, cache) = setup(vec![]);
    let old_timestamp = CacheStore::now_ms() - WEEK_MS / 2;
    cache
        .replace_all(&[CacheEntry {
            url: "https://example.com/hit".to_string(),
            timestamp: old_timestamp,
            data: cached_bookmark("Cached", "https://example.com/hit"),
        }])
        .unwrap();

    pipeline.run("https://example.com/hit").await.unwrap();

    let entries = cache.load();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].timestamp > old_timestamp);
    assert_eq!(entries[0].data.title, "Cached");
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_clear_then_rerun_refetches_and_repersists() {
    let list = "https://example.com/a";
    let (pipeline, fetcher, cache) = setup(vec![("https://example.com/a", page("A"))]);

    pipeline.run(list).await.unwrap();
    assert_eq!(fetcher.call_count(), 1);

    cache.clear().unwrap();
    assert!(cache.load().is_empty());

    pipeline.run(list).await.unwrap();
    assert_eq!(fetcher.call_count(), 2);
    let entries = cache.load();
    assert_eq!(entries.len(), 1);
    assert!(cache.is_fresh(&entries[0]));
}
