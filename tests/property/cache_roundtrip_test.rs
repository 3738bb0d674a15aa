//! Property-based tests for cache persistence.
//!
//! Any collection written through `replace_all` loads back identically, and
//! entries written at run time are always fresh.

use std::sync::Arc;

use linkboard::services::cache_store::CacheStore;
use linkboard::services::storage::MemoryStore;
use linkboard::types::bookmark::{Bookmark, CacheEntry};
use proptest::prelude::*;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

fn arb_entries() -> impl Strategy<Value = Vec<CacheEntry>> {
    proptest::collection::vec(
        ("[a-zA-Z0-9 ]{0,20}", "[a-zA-Z0-9 ]{0,30}"),
        0..8,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (title, short))| {
                // The index keeps URLs unique within the collection.
                let link = format!("https://example.com/{}", i);
                CacheEntry {
                    url: link.clone(),
                    timestamp: CacheStore::now_ms(),
                    data: Bookmark {
                        title,
                        short_description: short,
                        long_description: "long".to_string(),
                        preview: "https://example.com/p.png".to_string(),
                        link,
                        domain: "example.com".to_string(),
                    },
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn replace_all_then_load_roundtrips(entries in arb_entries()) {
        let cache = CacheStore::new(Arc::new(MemoryStore::new()), WEEK_MS);

        cache.replace_all(&entries).unwrap();
        prop_assert_eq!(cache.load(), entries);
    }

    #[test]
    fn entries_written_at_run_time_are_fresh(entries in arb_entries()) {
        let cache = CacheStore::new(Arc::new(MemoryStore::new()), WEEK_MS);
        cache.replace_all(&entries).unwrap();

        for entry in cache.load() {
            prop_assert!(cache.is_fresh(&entry));
        }
    }

    #[test]
    fn find_by_url_locates_every_written_entry(entries in arb_entries()) {
        let cache = CacheStore::new(Arc::new(MemoryStore::new()), WEEK_MS);
        cache.replace_all(&entries).unwrap();

        let loaded = cache.load();
        for entry in &entries {
            let found = CacheStore::find_by_url(&loaded, &entry.url);
            prop_assert_eq!(found, Some(entry));
        }
    }

    #[test]
    fn clear_always_empties_the_collection(entries in arb_entries()) {
        let cache = CacheStore::new(Arc::new(MemoryStore::new()), WEEK_MS);
        cache.replace_all(&entries).unwrap();

        cache.clear().unwrap();
        prop_assert!(cache.load().is_empty());
    }
}
