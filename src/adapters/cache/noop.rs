//! Cache that stores nothing.
//!
//! Used to verify that responses never depend on cached state, and to run
//! without caching entirely.

use std::marker::PhantomData;
use std::time::Duration;

use crate::ports::KeyValueCache;

#[derive(Debug)]
pub struct NoopCache<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> NoopCache<V> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<V> Default for NoopCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyValueCache<V> for NoopCache<V>
where
    V: Clone + Send + Sync,
{
    fn set(&self, _key: &str, _value: V, _ttl: Option<Duration>) {}

    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn has(&self, _key: &str) -> bool {
        false
    }

    fn delete(&self, _key: &str) -> bool {
        false
    }

    fn clear(&self) {}

    fn invalidate_by_prefix(&self, _pattern: &str) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_cache_never_returns_values() {
        let cache = NoopCache::<u32>::new();
        cache.set("k", 1, None);
        assert_eq!(cache.get("k"), None);
        assert!(!cache.has("k"));
        assert!(cache.is_empty());
    }
}
