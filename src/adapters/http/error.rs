//! HTTP error boundary.
//!
//! Every failure leaves the service through `ApiError`, which renders an
//! `AppError` as:
//!
//! ```json
//! {
//!   "error": "You need 1 credit(s) for this action but have 0.",
//!   "type": "payment",
//!   "code": "INSUFFICIENT_CREDITS",
//!   "userMessage": "You need 1 credit(s) for this action but have 0.",
//!   "retryable": false,
//!   "suggestions": ["..."],
//!   "creditsRequired": 1,
//!   "currentCredits": 0
//! }
//! ```
//!
//! `message` and `details` are added only when the responder exposes
//! details (outside production).

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::failure::{AppError, Severity};

use super::state::AppState;

/// Decides how much of an error reaches the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorResponder {
    pub expose_details: bool,
}

impl ErrorResponder {
    pub fn new(expose_details: bool) -> Self {
        Self { expose_details }
    }

    /// Wraps anything convertible to `AppError` for rendering.
    pub fn reject(&self, error: impl Into<AppError>) -> ApiError {
        ApiError {
            error: error.into(),
            expose_details: self.expose_details,
        }
    }
}

/// An `AppError` on its way to the client.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub error: AppError,
    pub expose_details: bool,
}

impl ApiError {
    /// Renders without internal message or details.
    pub fn public(error: impl Into<AppError>) -> Self {
        ErrorResponder::default().reject(error)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn body(&self) -> Value {
        let e = &self.error;
        let mut body = Map::new();
        body.insert("error".into(), Value::from(e.user_message.clone()));
        body.insert("type".into(), Value::from(e.kind.as_str()));
        body.insert("code".into(), Value::from(e.code_or_default()));
        body.insert("userMessage".into(), Value::from(e.user_message.clone()));
        body.insert("retryable".into(), Value::from(e.retryable));
        body.insert("suggestions".into(), Value::from(e.suggestions.clone()));
        for (key, value) in &e.extensions {
            body.insert(key.clone(), value.clone());
        }
        if self.expose_details {
            body.insert("message".into(), Value::from(e.message.clone()));
            if let Some(details) = &e.details {
                body.insert("details".into(), details.clone());
            }
        }
        Value::Object(body)
    }

    fn log(&self) {
        let e = &self.error;
        match e.severity {
            Severity::Critical | Severity::High => tracing::error!(
                kind = %e.kind,
                code = %e.code_or_default(),
                status = e.http_status(),
                retryable = e.retryable,
                "{}",
                e.message
            ),
            Severity::Medium => tracing::warn!(
                kind = %e.kind,
                code = %e.code_or_default(),
                status = e.http_status(),
                "{}",
                e.message
            ),
            Severity::Low => tracing::info!(
                kind = %e.kind,
                code = %e.code_or_default(),
                status = e.http_status(),
                "{}",
                e.message
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.body())).into_response()
    }
}

/// `axum::Json` whose rejections render as validation errors.
///
/// Malformed bodies, wrong content types and schema mismatches all become
/// 400 `validation` responses in the common shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for ApiJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(state.errors.reject(json_rejection(rejection))),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let mut error = AppError::validation(rejection.body_text())
        .with_user_message("The request body is not valid JSON for this endpoint.");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        error = error.with_status(StatusCode::PAYLOAD_TOO_LARGE.as_u16());
    }
    error
}
