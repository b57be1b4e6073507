//! In-memory TTL cache.
//!
//! A small async key-value store with per-entry expiry, used to absorb
//! repeated weather lookups. Reads hold the lock briefly; an expired entry
//! encountered on read is removed on the spot, and a background sweeper can
//! reclaim entries nobody reads again.
//!
//! Timestamps use `tokio::time::Instant`, so expiry is testable under a
//! paused runtime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

/// A concurrent TTL cache keyed by string.
///
/// Cloning is cheap; all clones share the same storage.
#[derive(Debug, Clone)]
pub struct Cache<T> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    default_ttl: Duration,
}

impl<T: Clone + Send + Sync + 'static> Cache<T> {
    /// Create a cache whose entries expire after `default_ttl` unless
    /// overridden per entry.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// Look up a live entry. An entry is live through its full TTL and only
    /// counts as expired strictly past the deadline; an expired entry is
    /// evicted on the spot.
    pub async fn get(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: upgrade to a write lock and remove. Re-check under the
        // write lock in case a concurrent set refreshed the entry.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(Instant::now()) {
                return Some(entry.value.clone());
            }
            entries.remove(key);
            debug!(key, "evicted expired cache entry");
        }
        None
    }

    /// Store a value with the default TTL, replacing any existing entry and
    /// restarting its clock.
    pub async fn set(&self, key: impl Into<String>, value: T) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Store a value with an explicit TTL.
    pub async fn set_with_ttl(&self, key: impl Into<String>, value: T, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Remove an entry. Returns whether anything was removed, expired
    /// entries included.
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drop all entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remove every expired entry. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "cache sweep");
        }
        removed
    }

    /// Spawn a background task that purges expired entries every `interval`.
    ///
    /// The task runs until aborted; dropping the cache's other handles does
    /// not stop it, so callers keep the `JoinHandle`.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick fires immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.purge_expired().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test]
    async fn get_returns_stored_value() {
        let cache: Cache<String> = Cache::new(Duration::from_secs(300));
        cache.set("weather:56.95:24.11", "snow".to_string()).await;
        assert_eq!(cache.get("weather:56.95:24.11").await.as_deref(), Some("snow"));
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        assert_eq!(cache.get("nope").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_lives_through_exact_ttl() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        cache.set("k", 1).await;

        // Visible right up to and including the deadline.
        advance(Duration::from_secs(300)).await;
        assert_eq!(cache.get("k").await, Some(1));

        advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn set_restarts_the_clock() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        cache.set("k", 1).await;

        advance(Duration::from_secs(200)).await;
        cache.set("k", 2).await;

        advance(Duration::from_secs(200)).await;
        // 400s after the first set, but only 200s after the second.
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn per_entry_ttl_overrides_default() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        cache.set_with_ttl("short", 1, Duration::from_secs(10)).await;
        cache.set("long", 2).await;

        advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.get("long").await, Some(2));
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        cache.set("k", 1).await;
        assert!(cache.delete("k").await);
        assert!(!cache.delete("k").await);
    }

    #[tokio::test(start_paused = true)]
    async fn delete_reports_removal_of_expired_entry() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(10));
        cache.set("k", 1).await;
        advance(Duration::from_secs(11)).await;

        // Still stored until a read or sweep evicts it, so removal counts.
        assert!(cache.delete("k").await);
        assert!(!cache.delete("k").await);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_read_evicts() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(10));
        cache.set("k", 1).await;
        advance(Duration::from_secs(11)).await;

        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn purge_removes_only_expired() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        cache.set_with_ttl("a", 1, Duration::from_secs(10)).await;
        cache.set_with_ttl("b", 2, Duration::from_secs(10)).await;
        cache.set("c", 3).await;

        advance(Duration::from_secs(20)).await;
        assert_eq!(cache.purge_expired().await, 2);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("c").await, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_reclaims_unread_entries() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(10));
        cache.set("k", 1).await;

        let handle = cache.spawn_sweeper(Duration::from_secs(30));
        // Let the sweeper task start and register its timer.
        tokio::task::yield_now().await;
        advance(Duration::from_secs(31)).await;
        // Let the sweeper task run.
        tokio::task::yield_now().await;

        assert_eq!(cache.len().await, 0);
        handle.abort();
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache: Cache<u32> = Cache::new(Duration::from_secs(300));
        cache.set("a", 1).await;
        cache.set("b", 2).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
