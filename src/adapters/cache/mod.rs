//! Cache adapters.
//!
//! - `TtlCache` - Mutex-guarded map with per-entry expiry
//! - `CacheSweeper` - Background purge loop for `TtlCache`
//! - `NoopCache` - Stores nothing

mod noop;
mod sweeper;
mod ttl_cache;

pub use noop::NoopCache;
pub use sweeper::{CacheSweeper, SweeperHandle};
pub use ttl_cache::{CacheEntry, TtlCache, TtlCacheConfig};
