//! Settings for the Mingzi API, read from `MINGZI__*` environment
//! variables (plus `.env` in development).
//!
//! ```no_run
//! use mingzi::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ai;
mod auth;
mod cache;
mod database;
mod error;
mod features;
mod payment;
mod render;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use payment::PaymentConfig;
pub use render::RenderConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Every section defaults, so a bare development checkout starts on the
/// in-memory adapters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub ai: AiConfig,
    pub payment: PaymentConfig,
    pub cache: CacheConfig,
    pub render: RenderConfig,
    pub features: FeatureFlags,
}

impl AppConfig {
    /// `MINGZI__SERVER__PORT=8080` sets `server.port`; nesting uses `__`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MINGZI")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Names of required settings that are absent.
    ///
    /// Outside production each absence means a development fallback.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let present = [
            ("MINGZI__DATABASE__URL", self.database.is_configured()),
            ("MINGZI__AUTH__SUPABASE_URL", self.auth.project_url().is_some()),
            (
                "MINGZI__AUTH__SUPABASE_SERVICE_ROLE_KEY",
                self.auth.service_role_key().is_some(),
            ),
            ("MINGZI__AUTH__SUPABASE_JWT_SECRET", self.auth.jwt_secret().is_some()),
            ("MINGZI__AI__LLM_API_KEY", self.ai.is_configured()),
            ("MINGZI__PAYMENT__CREEM_API_KEY", self.payment.api_key().is_some()),
            ("MINGZI__PAYMENT__CREEM_API_SECRET", self.payment.api_secret().is_some()),
            ("MINGZI__PAYMENT__CREEM_API_BASE_URL", self.payment.has_base_url()),
        ];
        present
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name)
            .collect()
    }

    /// Malformed values fail everywhere; absent required ones only in
    /// production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.cache.validate()?;
        self.render.validate()?;
        self.features.validate()?;

        if self.is_production() {
            let missing = self.missing_required();
            if !missing.is_empty() {
                return Err(ValidationError::MissingRequired(missing));
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Whether error responses carry internal messages and details.
    pub fn expose_error_details(&self) -> bool {
        !self.is_production() || self.features.verbose_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const REQUIRED: &[(&str, &str)] = &[
        ("MINGZI__DATABASE__URL", "postgresql://test@localhost/test"),
        ("MINGZI__AUTH__SUPABASE_URL", "https://abcd.supabase.co"),
        ("MINGZI__AUTH__SUPABASE_SERVICE_ROLE_KEY", "service-role"),
        ("MINGZI__AUTH__SUPABASE_JWT_SECRET", "super-secret-jwt-token"),
        ("MINGZI__AI__LLM_API_KEY", "sk-test"),
        ("MINGZI__PAYMENT__CREEM_API_KEY", "creem_test_xxx"),
        ("MINGZI__PAYMENT__CREEM_API_SECRET", "whsec_test"),
        ("MINGZI__PAYMENT__CREEM_API_BASE_URL", "https://test-api.creem.io"),
    ];

    const VARS: &[&str] = &[
        "MINGZI__DATABASE__URL",
        "MINGZI__AUTH__SUPABASE_URL",
        "MINGZI__AUTH__SUPABASE_SERVICE_ROLE_KEY",
        "MINGZI__AUTH__SUPABASE_JWT_SECRET",
        "MINGZI__AI__LLM_API_KEY",
        "MINGZI__PAYMENT__CREEM_API_KEY",
        "MINGZI__PAYMENT__CREEM_API_SECRET",
        "MINGZI__PAYMENT__CREEM_API_BASE_URL",
        "MINGZI__SERVER__PORT",
        "MINGZI__SERVER__ENVIRONMENT",
        "MINGZI__FEATURES__PDF_CREDIT_COST",
    ];

    fn set_full_env() {
        for (key, value) in REQUIRED {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)], full: bool) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        if full {
            set_full_env();
        }
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[], true).unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert!(config.missing_required().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = load_with(&[], false).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.features.pdf_credit_cost, 1);
        assert_eq!(config.missing_required().len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_all_secrets() {
        let config = load_with(&[("MINGZI__SERVER__ENVIRONMENT", "production")], false).unwrap();
        assert!(config.is_production());
        assert!(!config.expose_error_details());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(ref names)) if names.len() == 7
        ));
    }

    #[test]
    fn test_production_accepts_complete_environment() {
        let config = load_with(&[("MINGZI__SERVER__ENVIRONMENT", "production")], true).unwrap();
        assert!(config.missing_required().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_names_each_missing_setting() {
        for (absent, _) in REQUIRED {
            // Blank counts as absent, and also overrides the base URL default.
            let config = load_with(
                &[("MINGZI__SERVER__ENVIRONMENT", "production"), (*absent, "")],
                true,
            )
            .unwrap();
            assert_eq!(
                config.validate(),
                Err(ValidationError::MissingRequired(vec![*absent])),
                "{absent} should be required in production"
            );
        }
    }

    #[test]
    fn test_custom_values_are_parsed() {
        let config = load_with(
            &[
                ("MINGZI__SERVER__PORT", "3001"),
                ("MINGZI__FEATURES__PDF_CREDIT_COST", "2"),
            ],
            true,
        )
        .unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.features.pdf_credit_cost, 2);
    }
}
