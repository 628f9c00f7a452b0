//! In-process TTL cache.
//!
//! A mutex-guarded `HashMap` with per-entry expiry. Expired entries are
//! evicted lazily on access and periodically by `CacheSweeper`.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `default_ttl` | 5 min | TTL used when `set` is called without one |
//! | `sweep_interval` | 60 s | How often the sweeper purges expired entries |

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::ports::KeyValueCache;

/// Configuration for `TtlCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlCacheConfig {
    pub default_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for TtlCacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl TtlCacheConfig {
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// A stored value and its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub stored_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// An entry is expired once strictly more than `ttl` has elapsed.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }
}

/// Process-local TTL cache.
#[derive(Debug)]
pub struct TtlCache<V> {
    config: TtlCacheConfig,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V> TtlCache<V> {
    pub fn new(config: TtlCacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &TtlCacheConfig {
        &self.config
    }

    // A panic while holding the lock cannot leave the map half-updated,
    // so a poisoned lock is still safe to use.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored entries, expired or not.
    pub fn entry_count(&self) -> usize {
        self.entries().len()
    }

    /// Removes every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(TtlCacheConfig::default())
    }
}

impl<V> KeyValueCache<V> for TtlCache<V>
where
    V: Clone + Send + Sync,
{
    fn set(&self, key: &str, value: V, ttl: Option<Duration>) {
        let entry = CacheEntry {
            data: value,
            stored_at: Instant::now(),
            ttl: ttl.unwrap_or(self.config.default_ttl),
        };
        self.entries().insert(key.to_string(), entry);
    }

    fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.data.clone()),
            None => None,
        }
    }

    fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    fn clear(&self) {
        self.entries().clear();
    }

    fn invalidate_by_prefix(&self, pattern: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| !key.contains(pattern));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cache() -> TtlCache<u32> {
        TtlCache::new(TtlCacheConfig::default().with_default_ttl(Duration::from_secs(10)))
    }

    #[tokio::test(start_paused = true)]
    async fn get_returns_value_within_ttl() {
        let cache = cache();
        cache.set("credits:u1", 5, None);

        tokio::time::advance(Duration::from_secs(9)).await;

        assert_eq!(cache.get("credits:u1"), Some(5));
        assert!(cache.has("credits:u1"));
    }

    #[tokio::test(start_paused = true)]
    async fn get_returns_none_after_ttl_and_evicts() {
        let cache = cache();
        cache.set("credits:u1", 5, Some(Duration::from_secs(2)));

        tokio::time::advance(Duration::from_secs(3)).await;

        assert_eq!(cache.get("credits:u1"), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn has_applies_same_expiry_rule() {
        let cache = cache();
        cache.set("k", 1, Some(Duration::from_secs(1)));

        tokio::time::advance(Duration::from_millis(1500)).await;

        assert!(!cache.has("k"));
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn set_overwrites_and_resets_expiry() {
        let cache = cache();
        cache.set("k", 1, Some(Duration::from_secs(2)));
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.set("k", 2, Some(Duration::from_secs(2)));
        tokio::time::advance(Duration::from_millis(1500)).await;

        assert_eq!(cache.get("k"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn purge_expired_removes_only_expired() {
        let cache = cache();
        cache.set("short", 1, Some(Duration::from_secs(1)));
        cache.set("long", 2, Some(Duration::from_secs(60)));

        tokio::time::advance(Duration::from_secs(5)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[test]
    fn delete_reports_whether_entry_existed() {
        let cache = cache();
        cache.set("k", 1, None);
        assert!(cache.delete("k"));
        assert!(!cache.delete("k"));
    }

    #[test]
    fn clear_removes_everything() {
        let cache = cache();
        cache.set("a", 1, None);
        cache.set("b", 2, None);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_by_prefix_matches_substring() {
        let cache = cache();
        cache.set("credits:user-1", 1, None);
        cache.set("generation-logs:user-1:20", 2, None);
        cache.set("credits:user-2", 3, None);

        let removed = cache.invalidate_by_prefix("user-1");

        assert_eq!(removed, 2);
        assert_eq!(cache.get("credits:user-2"), Some(3));
        assert_eq!(cache.get("credits:user-1"), None);
    }

    proptest! {
        #[test]
        fn round_trip_returns_last_written_value(writes in prop::collection::vec(("[a-c]", 0u32..100), 1..30)) {
            let cache = TtlCache::new(TtlCacheConfig::default());
            let mut expected = HashMap::new();
            for (key, value) in &writes {
                cache.set(key, *value, None);
                expected.insert(key.clone(), *value);
            }
            for (key, value) in expected {
                prop_assert_eq!(cache.get(&key), Some(value));
            }
        }
    }
}
