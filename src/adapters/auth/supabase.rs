//! Supabase session validator.
//!
//! Supabase issues HS256 access tokens signed with the project's JWT secret.
//! Validation is local: no network round trip per request.
//!
//! Checked claims:
//! - **Signature**: HS256 with the project JWT secret
//! - **Audience (aud)**: must contain `authenticated`
//! - **Expiry (exp)**: must be in the future
//! - **Issuer (iss)**: `{supabase_url}/auth/v1` when a project URL is configured

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Audience Supabase puts on tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Configuration for the Supabase validator.
#[derive(Debug, Clone)]
pub struct SupabaseAuthConfig {
    /// Project JWT secret used to sign access tokens.
    pub jwt_secret: SecretString,

    /// Project URL, e.g. `https://abcd.supabase.co`. Enables issuer checks.
    pub project_url: Option<String>,
}

impl SupabaseAuthConfig {
    pub fn new(jwt_secret: SecretString) -> Self {
        Self {
            jwt_secret,
            project_url: None,
        }
    }

    pub fn with_project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = Some(url.into());
        self
    }

    fn issuer(&self) -> Option<String> {
        self.project_url
            .as_deref()
            .map(|url| format!("{}/auth/v1", url.trim_end_matches('/')))
    }
}

/// Claims we read from Supabase access tokens. `aud`, `exp` and `iss`
/// are checked by `jsonwebtoken` during decoding.
#[derive(Debug, Serialize, Deserialize)]
struct SupabaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Validates Supabase access tokens with the project JWT secret.
pub struct SupabaseJwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SupabaseJwtValidator {
    pub fn new(config: SupabaseAuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        validation.validate_exp = true;
        match config.issuer() {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub", "aud"]),
        }

        Self {
            decoding_key,
            validation,
        }
    }

    fn decode(&self, token: &str) -> Result<TokenData<SupabaseClaims>, AuthError> {
        decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Token audience is not '{}'", AUTHENTICATED_AUDIENCE);
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }

    fn to_user(claims: SupabaseClaims) -> Result<AuthenticatedUser, AuthError> {
        let id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let display_name = claims
            .user_metadata
            .and_then(|m| m.full_name.or(m.name))
            .filter(|n| !n.trim().is_empty());
        Ok(AuthenticatedUser::new(
            id,
            claims.email.unwrap_or_default(),
            display_name,
        ))
    }
}

#[async_trait]
impl SessionValidator for SupabaseJwtValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = self.decode(token)?;
        Self::to_user(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn validator() -> SupabaseJwtValidator {
        SupabaseJwtValidator::new(SupabaseAuthConfig::new(SecretString::new(SECRET.to_string())))
    }

    fn sign(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn valid_token_yields_user() {
        let token = sign(
            json!({
                "sub": "user-abc",
                "aud": "authenticated",
                "exp": future_exp(),
                "email": "a@example.com",
                "user_metadata": { "full_name": "Ada" }
            }),
            SECRET,
        );

        let user = validator().validate(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "user-abc");
        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let token = sign(
            json!({ "sub": "u", "aud": "authenticated", "exp": future_exp() }),
            "another-secret-another-secret-another-secret",
        );
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn anon_audience_is_rejected() {
        let token = sign(json!({ "sub": "u", "aud": "anon", "exp": future_exp() }), SECRET);
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_reported() {
        let token = sign(
            json!({ "sub": "u", "aud": "authenticated", "exp": chrono::Utc::now().timestamp() - 3600 }),
            SECRET,
        );
        assert!(matches!(
            validator().validate(&token).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn issuer_checked_when_project_url_configured() {
        let validator = SupabaseJwtValidator::new(
            SupabaseAuthConfig::new(SecretString::new(SECRET.to_string()))
                .with_project_url("https://proj.supabase.co/"),
        );
        let good = sign(
            json!({ "sub": "u", "aud": "authenticated", "exp": future_exp(), "iss": "https://proj.supabase.co/auth/v1" }),
            SECRET,
        );
        let bad = sign(
            json!({ "sub": "u", "aud": "authenticated", "exp": future_exp(), "iss": "https://other.supabase.co/auth/v1" }),
            SECRET,
        );

        assert!(validator.validate(&good).await.is_ok());
        assert!(matches!(validator.validate(&bad).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        assert!(matches!(
            validator().validate("not-a-jwt").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
