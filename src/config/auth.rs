//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (Supabase)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub supabase_url: Option<String>,

    /// Public anon key. Not used server side; accepted so one env file
    /// serves both frontend and backend.
    pub supabase_anon_key: Option<SecretString>,

    pub supabase_service_role_key: Option<SecretString>,

    /// Secret the project signs access tokens with
    pub supabase_jwt_secret: Option<SecretString>,
}

impl AuthConfig {
    /// The JWT secret, when set and non-empty.
    pub fn jwt_secret(&self) -> Option<&SecretString> {
        self.supabase_jwt_secret
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
    }

    /// The project URL, when set and non-empty.
    pub fn project_url(&self) -> Option<&str> {
        self.supabase_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn service_role_key(&self) -> Option<&SecretString> {
        self.supabase_service_role_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the project URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if let Some(url) = self.project_url() {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidUrl("SUPABASE_URL"));
            }
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::SupabaseUrlMustBeHttps);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let config = AuthConfig {
            supabase_jwt_secret: Some(SecretString::new("  ".to_string())),
            ..Default::default()
        };
        assert!(config.jwt_secret().is_none());
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            supabase_url: Some("http://localhost:54321".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::SupabaseUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_rejects_non_url() {
        let config = AuthConfig {
            supabase_url: Some("abcd.supabase.co".to_string()),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }
}
