//! Bearer token to user.
//!
//! Sign-in happens at the hosted identity provider; this service only ever
//! sees the resulting access token.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Checks an access token and returns who it belongs to.
///
/// Expired tokens map to `TokenExpired`, any other rejection to
/// `InvalidToken`. Missing configuration is `ServiceUnavailable`.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` has the `Bearer ` prefix already stripped.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
