use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;

/// How long successful bodies stay fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Discover, search, detail and external id bodies
    pub listing: Duration,
    pub genre: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            listing: Duration::from_secs(60 * 60 * 24),
            genre: Duration::from_secs(60 * 60 * 24 * 7),
        }
    }
}

#[derive(Debug)]
struct MemoEntry {
    stored_at: Instant,
    ttl: Duration,
    body: Arc<Value>,
}

impl MemoEntry {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Response bodies keyed by full request URL. Only successful responses are
/// stored.
#[derive(Debug, Default)]
pub struct ResponseMemo {
    entries: DashMap<String, MemoEntry>,
}

impl ResponseMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<Value>> {
        let fresh = self
            .entries
            .get(url)
            .filter(|entry| entry.is_fresh())
            .map(|entry| Arc::clone(&entry.body));

        match fresh {
            Some(body) => {
                debug!(url, "memo hit");
                Some(body)
            }
            None => {
                // evict if expired
                self.entries.remove_if(url, |_, entry| !entry.is_fresh());
                debug!(url, "memo miss");
                None
            }
        }
    }

    pub fn insert(&self, url: String, body: Arc<Value>, ttl: Duration) {
        self.entries.insert(
            url,
            MemoEntry {
                stored_at: Instant::now(),
                ttl,
                body,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_entries_are_served() {
        let memo = ResponseMemo::new();
        memo.insert(
            "https://api.test/genre/movie/list".to_string(),
            Arc::new(json!({"genres": []})),
            Duration::from_secs(60),
        );
        let body = memo.get("https://api.test/genre/movie/list").unwrap();
        assert_eq!(*body, json!({"genres": []}));
    }

    #[test]
    fn expired_entries_are_evicted() {
        let memo = ResponseMemo::new();
        memo.insert("k".to_string(), Arc::new(json!(1)), Duration::ZERO);
        assert!(memo.get("k").is_none());
        assert!(memo.is_empty());
    }

    #[test]
    fn clear_drops_fresh_entries() {
        let memo = ResponseMemo::new();
        memo.insert("a".to_string(), Arc::new(json!(1)), Duration::from_secs(60));
        memo.insert("b".to_string(), Arc::new(json!(2)), Duration::from_secs(60));
        assert_eq!(memo.len(), 2);

        memo.clear();
        assert!(memo.is_empty());
        assert!(memo.get("a").is_none());
    }
}
