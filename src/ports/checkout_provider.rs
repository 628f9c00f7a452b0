//! Checkout provider port for hosted payment pages.
//!
//! The provider hosts the payment form. This service only creates a
//! checkout session and hands the URL back to the browser; fulfilment
//! arrives later through provider webhooks handled elsewhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::billing::ProductType;
use crate::domain::failure::{AppError, ErrorKind};
use crate::domain::foundation::UserId;

/// Port for payment provider checkout sessions.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session and return its URL.
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Provider product identifier.
    pub product_id: String,

    /// Customer email for pre-fill.
    pub email: String,

    /// Internal user ID (sent as metadata so webhooks can find the customer).
    pub user_id: UserId,

    pub checkout_type: ProductType,

    /// Credits granted on completion, for credit packs.
    pub credits_amount: Option<u32>,

    pub discount_code: Option<String>,

    /// URL to redirect to after successful checkout.
    pub success_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the customer to complete checkout.
    pub checkout_url: String,
}

/// Category of a checkout failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutErrorCode {
    /// Provider could not be reached.
    NetworkError,
    /// Provider rejected our credentials.
    AuthenticationError,
    /// Provider rejected the request (unknown product, bad discount code).
    InvalidRequest,
    /// Provider answered with a server error or an unparseable body.
    ProviderError,
    /// Provider credentials are not configured.
    NotConfigured,
}

impl CheckoutErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutErrorCode::NetworkError | CheckoutErrorCode::ProviderError
        )
    }
}

impl fmt::Display for CheckoutErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckoutErrorCode::NetworkError => "network_error",
            CheckoutErrorCode::AuthenticationError => "authentication_error",
            CheckoutErrorCode::InvalidRequest => "invalid_request",
            CheckoutErrorCode::ProviderError => "provider_error",
            CheckoutErrorCode::NotConfigured => "not_configured",
        };
        write!(f, "{}", s)
    }
}

/// Errors from checkout operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutError {
    pub code: CheckoutErrorCode,
    pub message: String,
    /// HTTP status or error code reported by the provider, if any.
    pub provider_code: Option<String>,
    pub retryable: bool,
}

impl CheckoutError {
    pub fn new(code: CheckoutErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CheckoutErrorCode::NetworkError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(CheckoutErrorCode::ProviderError, message)
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(CheckoutErrorCode::NotConfigured, message)
    }
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CheckoutError {}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        let kind = match err.code {
            CheckoutErrorCode::NetworkError => ErrorKind::Network,
            CheckoutErrorCode::AuthenticationError
            | CheckoutErrorCode::InvalidRequest
            | CheckoutErrorCode::ProviderError => ErrorKind::ExternalService,
            CheckoutErrorCode::NotConfigured => ErrorKind::Internal,
        };
        let mut app = AppError::new(kind, err.to_string())
            .with_code(format!("CHECKOUT_{}", err.code.to_string().to_uppercase()))
            .with_user_message("We could not start checkout. Please try again.")
            .with_retryable(err.retryable);
        if let Some(provider_code) = err.provider_code {
            app = app.with_details(serde_json::json!({ "providerCode": provider_code }));
        }
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_retryable() {
        assert!(CheckoutError::network("reset").retryable);
        assert!(!CheckoutError::new(CheckoutErrorCode::InvalidRequest, "bad").retryable);
    }

    #[test]
    fn network_error_maps_to_network_kind() {
        let app = AppError::from(CheckoutError::network("connection refused"));
        assert_eq!(app.kind, ErrorKind::Network);
        assert!(app.retryable);
        assert_eq!(app.code.as_deref(), Some("CHECKOUT_NETWORK_ERROR"));
    }

    #[test]
    fn provider_error_maps_to_external_service_with_code() {
        let app = AppError::from(CheckoutError::provider("bad gateway").with_provider_code("502"));
        assert_eq!(app.kind, ErrorKind::ExternalService);
        assert_eq!(app.http_status(), 500);
        assert_eq!(app.details.unwrap()["providerCode"], "502");
    }

    #[test]
    fn missing_credentials_are_internal() {
        let app = AppError::from(CheckoutError::not_configured("no api key"));
        assert_eq!(app.kind, ErrorKind::Internal);
        assert!(!app.retryable);
    }
}
