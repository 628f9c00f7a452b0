//! PDF renderer configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::document::DEFAULT_RENDER_TIMEOUT_SECS;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Chromium binary. Looked up on `PATH` as `chromium` when unset.
    pub chromium_path: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RenderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Budget for the whole gated export: render plus process start-up.
    pub fn side_effect_timeout(&self) -> Duration {
        self.timeout() + Duration::from_secs(10)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 240 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chromium_path: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_RENDER_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_effect_budget_exceeds_render_timeout() {
        let config = RenderConfig::default();
        assert!(config.side_effect_timeout() > config.timeout());
    }
}
