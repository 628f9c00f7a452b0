//! Cache configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::cache::TtlCacheConfig;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl")]
    pub default_ttl_secs: u64,

    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Disables caching entirely (every read goes to the source).
    #[serde(default)]
    pub disabled: bool,
}

impl CacheConfig {
    pub fn ttl_cache_config(&self) -> TtlCacheConfig {
        TtlCacheConfig::default()
            .with_default_ttl(Duration::from_secs(self.default_ttl_secs))
            .with_sweep_interval(Duration::from_secs(self.sweep_interval_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_ttl_secs == 0 || self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidCacheTiming);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: default_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            disabled: false,
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_sweep_interval() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_ttl_cache_config() {
        let config = CacheConfig {
            default_ttl_secs: 30,
            sweep_interval_secs: 5,
            disabled: false,
        };
        let ttl = config.ttl_cache_config();
        assert_eq!(ttl.default_ttl, Duration::from_secs(30));
        assert_eq!(ttl.sweep_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let config = CacheConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCacheTiming));
    }
}
