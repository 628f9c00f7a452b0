//! The signed-in caller.
//!
//! `auth_middleware` puts an `AuthenticatedUser` into request extensions
//! once the `SessionValidator` accepts the bearer token; handlers read it
//! back through `RequireAuth`.

use super::UserId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,

    /// Forwarded to the checkout provider as the customer email.
    pub email: String,

    /// From the provider's user metadata, when present.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }
}

/// Why a request has no usable session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingToken,

    /// Bad signature, wrong audience or issuer, or unparseable.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Validator misconfigured or unreachable. Not the caller's fault.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
