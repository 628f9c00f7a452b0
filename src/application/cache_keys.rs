//! Read-through cache payloads and their keys.
//!
//! Keys embed the user id between `:` delimiters. Invalidation matches on
//! the delimited fragment, so `user-1` never clears `user-10`.

use std::sync::Arc;

use crate::domain::credits::CreditBalance;
use crate::domain::foundation::UserId;
use crate::domain::naming::GenerationLogEntry;
use crate::ports::KeyValueCache;

/// Values the application memoizes.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Balance(CreditBalance),
    GenerationLogs(Vec<GenerationLogEntry>),
}

/// The cache as handlers hold it.
pub type SharedCache = Arc<dyn KeyValueCache<CachedValue>>;

pub fn credits_key(user_id: &UserId) -> String {
    format!("credits:{}", user_id.as_str())
}

pub fn generation_logs_key(user_id: &UserId, limit: u32) -> String {
    format!("{}{}", generation_logs_fragment(user_id), limit)
}

fn generation_logs_fragment(user_id: &UserId) -> String {
    format!("generation-logs:{}:", user_id.as_str())
}

/// Drops every cached read belonging to `user_id`. Returns how many
/// entries went.
pub fn invalidate_user(cache: &dyn KeyValueCache<CachedValue>, user_id: &UserId) -> usize {
    let balance = usize::from(cache.delete(&credits_key(user_id)));
    balance + cache.invalidate_by_prefix(&generation_logs_fragment(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::{TtlCache, TtlCacheConfig};
    use crate::domain::foundation::CustomerId;

    #[test]
    fn keys_contain_user_id() {
        let user = UserId::new("user-42").unwrap();
        assert!(credits_key(&user).contains("user-42"));
        assert!(generation_logs_key(&user, 20).contains("user-42"));
        assert_ne!(generation_logs_key(&user, 20), generation_logs_key(&user, 50));
    }

    #[test]
    fn invalidating_a_user_spares_longer_ids() {
        let cache = TtlCache::new(TtlCacheConfig::default());
        let short = UserId::new("user-1").unwrap();
        let long = UserId::new("user-10").unwrap();
        for user in [&short, &long] {
            cache.set(
                &credits_key(user),
                CachedValue::Balance(CreditBalance::new(CustomerId::new(), user.clone(), 3)),
                None,
            );
            cache.set(&generation_logs_key(user, 20), CachedValue::GenerationLogs(vec![]), None);
        }

        assert_eq!(invalidate_user(&cache, &short), 2);

        assert!(!cache.has(&credits_key(&short)));
        assert!(!cache.has(&generation_logs_key(&short, 20)));
        assert!(cache.has(&credits_key(&long)));
        assert!(cache.has(&generation_logs_key(&long, 20)));
    }
}
