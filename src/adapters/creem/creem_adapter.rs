//! Creem checkout provider adapter.
//!
//! Creates hosted checkout sessions through `POST {base}/v1/checkouts`.
//! The API key travels in the `x-api-key` header and stays wrapped in
//! `secrecy::SecretString` until the request is built.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CreemConfig::new(api_key).with_base_url("https://test-api.creem.io");
//! let adapter = CreemCheckoutProvider::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::billing::ProductType;
use crate::ports::{
    CheckoutError, CheckoutErrorCode, CheckoutProvider, CheckoutRequest, CheckoutSession,
};

/// Production API host.
pub const CREEM_API_BASE_URL: &str = "https://api.creem.io";

/// Creem API configuration.
#[derive(Clone)]
pub struct CreemConfig {
    api_key: SecretString,

    /// Base URL for the Creem API (default: https://api.creem.io).
    api_base_url: String,

    request_timeout: Duration,
}

impl CreemConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: CREEM_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (test mode host or a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn checkouts_url(&self) -> String {
        format!("{}/v1/checkouts", self.api_base_url)
    }
}

#[derive(Debug, Serialize)]
struct CreemCustomer<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct CreemMetadata<'a> {
    user_id: &'a str,
    checkout_type: ProductType,
    #[serde(skip_serializing_if = "Option::is_none")]
    credits_amount: Option<u32>,
}

#[derive(Debug, Serialize)]
struct CreemCheckoutBody<'a> {
    product_id: &'a str,
    success_url: &'a str,
    customer: CreemCustomer<'a>,
    metadata: CreemMetadata<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_code: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreemCheckoutResponse {
    id: String,
    checkout_url: String,
}

#[derive(Debug, Deserialize)]
struct CreemErrorResponse {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl CreemErrorResponse {
    fn describe(&self) -> Option<String> {
        match &self.message {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => self.error.clone(),
        }
    }
}

/// Creem checkout provider.
pub struct CreemCheckoutProvider {
    config: CreemConfig,
    http_client: reqwest::Client,
}

impl CreemCheckoutProvider {
    pub fn new(config: CreemConfig) -> Result<Self, CheckoutError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CheckoutError::not_configured(format!("HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn status_error(status: reqwest::StatusCode, body: &str) -> CheckoutError {
        let detail = serde_json::from_str::<CreemErrorResponse>(body)
            .ok()
            .and_then(|e| e.describe())
            .unwrap_or_else(|| body.trim().to_string());

        let code = match status.as_u16() {
            401 | 403 => CheckoutErrorCode::AuthenticationError,
            400..=499 => CheckoutErrorCode::InvalidRequest,
            _ => CheckoutErrorCode::ProviderError,
        };
        CheckoutError::new(code, format!("Creem API error ({}): {}", status, detail))
            .with_provider_code(status.as_u16().to_string())
    }
}

#[async_trait]
impl CheckoutProvider for CreemCheckoutProvider {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let body = CreemCheckoutBody {
            product_id: &request.product_id,
            success_url: &request.success_url,
            customer: CreemCustomer {
                email: &request.email,
            },
            metadata: CreemMetadata {
                user_id: request.user_id.as_str(),
                checkout_type: request.checkout_type,
                credits_amount: request.credits_amount,
            },
            discount_code: request.discount_code.as_deref(),
        };

        let response = self
            .http_client
            .post(self.config.checkouts_url())
            .header("x-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Creem request failed");
                CheckoutError::network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = Self::status_error(status, &error_text);
            tracing::warn!(status = %status, error = %err, "Creem rejected checkout");
            return Err(err);
        }

        let session: CreemCheckoutResponse = response.json().await.map_err(|e| {
            CheckoutError::provider(format!("Failed to parse Creem response: {}", e))
        })?;

        tracing::info!(
            checkout_id = %session.id,
            product_id = %request.product_id,
            user_id = %request.user_id.as_str(),
            "Created Creem checkout session"
        );

        Ok(CheckoutSession {
            id: session.id,
            checkout_url: session.checkout_url,
        })
    }
}
