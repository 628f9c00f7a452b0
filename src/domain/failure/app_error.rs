//! Normalized application error.
//!
//! Built once per failure and consumed immediately by the HTTP boundary.
//! Never persisted.

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;

use super::{ErrorClassifier, ErrorKind, Severity};
use crate::domain::credits::LedgerError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};

/// A classified failure with everything the response formatter needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub severity: Severity,
    /// Internal message. Only shown to clients outside production.
    pub message: String,
    pub user_message: String,
    pub code: Option<String>,
    pub details: Option<Value>,
    pub suggestions: Vec<String>,
    pub retryable: bool,
    /// Explicit HTTP status overriding the per-kind default.
    pub status: Option<u16>,
    /// Extra top-level response fields (e.g. `creditsRequired`).
    pub extensions: Map<String, Value>,
}

impl AppError {
    /// Creates an error with the per-kind defaults filled in.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            user_message: kind.default_user_message().to_string(),
            code: None,
            details: None,
            suggestions: kind
                .default_suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            retryable: kind.default_retryable(),
            status: None,
            extensions: Map::new(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Payment failure for a balance that does not cover the operation.
    /// Keeps the payment kind's retryable default: a top-up makes the same
    /// request succeed.
    pub fn insufficient_credits(required: u32, current: u32) -> Self {
        Self::new(
            ErrorKind::Payment,
            format!("Insufficient credits: required {}, current {}", required, current),
        )
        .with_code("INSUFFICIENT_CREDITS")
        .with_user_message(format!(
            "You need {} credit(s) for this action but have {}.",
            required, current
        ))
        .with_extension("creditsRequired", required)
        .with_extension("currentCredits", current)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_user_message(mut self, user_message: impl Into<String>) -> Self {
        self.user_message = user_message.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// HTTP status: the explicit override, else the per-kind default.
    pub fn http_status(&self) -> u16 {
        self.status.unwrap_or_else(|| self.kind.default_status())
    }

    /// Machine code: the explicit one, else the per-kind default.
    pub fn code_or_default(&self) -> &str {
        self.code
            .as_deref()
            .unwrap_or_else(|| self.kind.default_code())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientCredits { required, current } => {
                AppError::insufficient_credits(required, current)
            }
            LedgerError::CustomerNotFound(ref user_id) => AppError::not_found(err.to_string())
                .with_code("CUSTOMER_NOT_FOUND")
                .with_user_message("No billing account exists for your user.")
                .with_details(serde_json::json!({ "userId": user_id.as_str() })),
            LedgerError::InvalidAmount(_) => AppError::validation(err.to_string()),
            LedgerError::Storage(_) => ErrorClassifier::classify_storage(&err.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        AppError::validation(err.to_string())
            .with_code("VALIDATION_FAILED")
            .with_details(serde_json::json!({ "field": field }))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ServiceUnavailable(_) => {
                AppError::new(ErrorKind::ExternalService, err.to_string())
            }
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                AppError::authentication(err.to_string())
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let kind = match err.code {
            ErrorCode::ValidationFailed => ErrorKind::Validation,
            ErrorCode::CustomerNotFound | ErrorCode::ProductNotFound => ErrorKind::NotFound,
            ErrorCode::DatabaseError => ErrorClassifier::storage_kind(&err.message),
            ErrorCode::InternalError => ErrorKind::Internal,
        };
        let mut app = AppError::new(kind, err.message.clone()).with_code(err.code.to_string());
        if !err.details.is_empty() {
            let details: Map<String, Value> = err
                .details
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            app = app.with_details(Value::Object(details));
        }
        app
    }
}
