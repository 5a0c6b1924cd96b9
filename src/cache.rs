//! Time-bounded memoization of rendered pages.
//!
//! Entries live for a fixed interval after they are stored. Nothing in the
//! data layer invalidates them: a page rendered before a post was deleted
//! keeps being served until the entry expires or [`PageCache::clear`] runs.

use std::time::Duration;

use axum::http::Uri;
use moka::sync::Cache;
use tracing::info;

/// Every distinct `?page=` value is its own entry, so the cache is bounded.
pub const INDEX_CACHE_MAX_ENTRIES: u64 = 300;

#[derive(Clone)]
pub struct PageCache {
    entries: Cache<String, String>,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, INDEX_CACHE_MAX_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }

    pub fn insert(&self, key: String, body: String) {
        self.entries.insert(key, body);
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
        info!("Page cache cleared");
    }

    /// Approximate; pending evictions are applied first.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pages carry the viewer's navigation bar, so the key includes who is looking.
pub fn page_cache_key(uri: &Uri, viewer: Option<i64>) -> String {
    let path = uri
        .path_and_query()
        .map(|path| path.as_str())
        .unwrap_or_else(|| uri.path());
    match viewer {
        Some(id) => format!("{path}#user:{id}"),
        None => format!("{path}#anonymous"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_body_is_returned_until_cleared() {
        let cache = PageCache::new(Duration::from_secs(20));
        cache.insert("/#anonymous".to_string(), "<p>first</p>".to_string());

        assert_eq!(cache.get("/#anonymous").as_deref(), Some("<p>first</p>"));
        assert_eq!(cache.get("/?page=2#anonymous"), None);

        cache.clear();
        assert_eq!(cache.get("/#anonymous"), None);
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = PageCache::new(Duration::from_millis(30));
        cache.insert("/#anonymous".to_string(), "stale".to_string());
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get("/#anonymous"), None);
    }

    #[test]
    fn distinct_keys_stay_within_capacity() {
        let cache = PageCache::with_capacity(Duration::from_secs(20), 50);
        for i in 0..5000 {
            cache.insert(format!("/?page=x{i}#anonymous"), "<p>page</p>".to_string());
        }
        assert!(cache.len() <= 50);
    }

    #[test]
    fn key_includes_query_and_viewer() {
        let uri: Uri = "/?page=2".parse().unwrap();
        assert_eq!(page_cache_key(&uri, None), "/?page=2#anonymous");
        assert_eq!(page_cache_key(&uri, Some(7)), "/?page=2#user:7");
    }
}
