//! Ephemeral key-value cache port.
//!
//! Process-local, best-effort memoization of read results. Nothing may
//! depend on the cache for correctness: a cache that stores nothing must
//! produce the same responses, only slower.

use std::time::Duration;

/// Synchronous TTL cache keyed by string.
///
/// All operations are in-memory and non-blocking, so the trait is not async.
pub trait KeyValueCache<V>: Send + Sync
where
    V: Clone + Send + Sync,
{
    /// Stores `value` under `key`, replacing any previous entry.
    /// `None` uses the cache's default TTL.
    fn set(&self, key: &str, value: V, ttl: Option<Duration>);

    /// Returns the value if present and not expired. An expired entry
    /// found here is evicted.
    fn get(&self, key: &str) -> Option<V>;

    /// Same expiry rule as `get`, without cloning the value.
    fn has(&self, key: &str) -> bool;

    /// Removes `key`. Returns true if an entry was removed.
    fn delete(&self, key: &str) -> bool;

    /// Removes everything.
    fn clear(&self);

    /// Removes every key containing `pattern` anywhere in its name.
    /// Returns the number of entries removed.
    fn invalidate_by_prefix(&self, pattern: &str) -> usize;

    /// Number of stored entries, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
