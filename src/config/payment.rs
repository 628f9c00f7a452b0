//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::creem::CREEM_API_BASE_URL;
use crate::domain::billing::ProductCatalog;

use super::error::{ConfigError, ValidationError};

/// Payment configuration (Creem)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub creem_api_key: Option<SecretString>,

    /// Webhook signing secret. Webhooks are handled elsewhere, but a
    /// production deployment without it is misconfigured.
    pub creem_api_secret: Option<SecretString>,

    #[serde(default = "default_base_url")]
    pub creem_api_base_url: String,

    /// Where Creem redirects after a completed checkout
    #[serde(default = "default_success_url")]
    pub success_url: String,

    /// YAML product catalog. The built-in catalog is used when unset.
    pub catalog_path: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl PaymentConfig {
    /// The API key, when set and non-empty.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.creem_api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    pub fn api_secret(&self) -> Option<&SecretString> {
        self.creem_api_secret
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
    }

    pub fn has_base_url(&self) -> bool {
        !self.creem_api_base_url.trim().is_empty()
    }

    /// Check if pointed at the Creem test host
    pub fn is_test_mode(&self) -> bool {
        self.creem_api_base_url.contains("test-api.")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Loads the product catalog from `catalog_path`, or the built-in one.
    pub fn load_catalog(&self) -> Result<ProductCatalog, ConfigError> {
        match self.catalog_path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                let yaml =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
                        path: path.to_string(),
                        source,
                    })?;
                Ok(ProductCatalog::from_yaml(&yaml)?)
            }
            None => Ok(ProductCatalog::builtin()?),
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        // A blank base URL is reported by `AppConfig::missing_required`.
        let base_url = Some(&self.creem_api_base_url).filter(|_| self.has_base_url());
        for (name, url) in [
            ("CREEM_API_BASE_URL", base_url),
            ("SUCCESS_URL", Some(&self.success_url)),
        ] {
            let Some(url) = url else { continue };
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidUrl(name));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            creem_api_key: None,
            creem_api_secret: None,
            creem_api_base_url: default_base_url(),
            success_url: default_success_url(),
            catalog_path: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    CREEM_API_BASE_URL.to_string()
}

fn default_success_url() -> String {
    "http://localhost:3000/payment/success".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_use_builtin_catalog() {
        let config = PaymentConfig::default();
        let catalog = config.load_catalog().unwrap();
        assert!(catalog.by_tier_id("tier-hobby").is_some());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "tiers:\n  - id: only\n    name: Only\n    product_id: prod_only\n    product_type: credits\n    credit_amount: 5\n    featured: true"
        )
        .unwrap();

        let config = PaymentConfig {
            catalog_path: Some(file.path().display().to_string()),
            ..Default::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.tiers().len(), 1);
        assert_eq!(catalog.tiers()[0].product_id, "prod_only");
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let config = PaymentConfig {
            catalog_path: Some("/nonexistent/products.yaml".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::CatalogRead { .. })
        ));
    }

    #[test]
    fn test_test_mode_host() {
        let config = PaymentConfig {
            creem_api_base_url: "https://test-api.creem.io".to_string(),
            ..Default::default()
        };
        assert!(config.is_test_mode());
    }

    #[test]
    fn test_validation_rejects_bad_success_url() {
        let config = PaymentConfig {
            success_url: "/payment/success".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUrl("SUCCESS_URL")));
    }
}
