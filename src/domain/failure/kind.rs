//! Closed taxonomy of failure kinds and severities.
//!
//! Clients branch only on `type` and `retryable`, so the per-kind defaults
//! below are part of the public contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of failure, serialized as the `type` field of error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    RateLimit,
    Payment,
    ExternalService,
    Database,
    Network,
    Internal,
    NotFound,
    Conflict,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::Validation,
        ErrorKind::Authentication,
        ErrorKind::Authorization,
        ErrorKind::RateLimit,
        ErrorKind::Payment,
        ErrorKind::ExternalService,
        ErrorKind::Database,
        ErrorKind::Network,
        ErrorKind::Internal,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Authorization => "authorization",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Payment => "payment",
            ErrorKind::ExternalService => "external_service",
            ErrorKind::Database => "database",
            ErrorKind::Network => "network",
            ErrorKind::Internal => "internal",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
        }
    }

    /// Only caller mistakes are final; everything else may succeed later.
    pub fn default_retryable(&self) -> bool {
        !matches!(
            self,
            ErrorKind::Validation | ErrorKind::Authentication | ErrorKind::Authorization
        )
    }

    pub fn default_status(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Authentication => 401,
            ErrorKind::Authorization | ErrorKind::Payment => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::RateLimit => 429,
            ErrorKind::ExternalService
            | ErrorKind::Database
            | ErrorKind::Network
            | ErrorKind::Internal => 500,
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            ErrorKind::Validation | ErrorKind::RateLimit | ErrorKind::NotFound => Severity::Low,
            ErrorKind::Authentication
            | ErrorKind::Authorization
            | ErrorKind::Payment
            | ErrorKind::Network
            | ErrorKind::Conflict => Severity::Medium,
            ErrorKind::Database | ErrorKind::ExternalService => Severity::High,
            ErrorKind::Internal => Severity::Critical,
        }
    }

    /// Machine code used when the failure carries none of its own.
    pub fn default_code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Authentication => "AUTHENTICATION_REQUIRED",
            ErrorKind::Authorization => "ACCESS_DENIED",
            ErrorKind::RateLimit => "RATE_LIMITED",
            ErrorKind::Payment => "PAYMENT_REQUIRED",
            ErrorKind::ExternalService => "EXTERNAL_SERVICE_ERROR",
            ErrorKind::Database => "DATABASE_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
        }
    }

    pub fn default_user_message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Please check your input and try again.",
            ErrorKind::Authentication => "Please sign in to continue.",
            ErrorKind::Authorization => "You do not have permission to perform this action.",
            ErrorKind::RateLimit => "Too many requests. Please wait a moment and try again.",
            ErrorKind::Payment => "There was a problem with your credits or payment.",
            ErrorKind::ExternalService => {
                "A service we depend on is having trouble. Please try again shortly."
            }
            ErrorKind::Database => "We could not load or save your data. Please try again.",
            ErrorKind::Network => "A network problem occurred. Please check your connection.",
            ErrorKind::Internal => "Something went wrong on our side.",
            ErrorKind::NotFound => "The requested resource was not found.",
            ErrorKind::Conflict => "This request conflicts with the current state.",
        }
    }

    pub fn default_suggestions(&self) -> &'static [&'static str] {
        match self {
            ErrorKind::Validation => &["Check the highlighted fields", "Fill in all required fields"],
            ErrorKind::Authentication => &["Sign in again", "Clear your browser cookies"],
            ErrorKind::Authorization => &["Contact support if you believe this is a mistake"],
            ErrorKind::RateLimit => &["Wait a minute before retrying"],
            ErrorKind::Payment => &["Purchase more credits", "Check your subscription status"],
            ErrorKind::ExternalService => &["Try again in a few minutes"],
            ErrorKind::Database => &["Try again in a few minutes"],
            ErrorKind::Network => &["Check your internet connection", "Try again"],
            ErrorKind::Internal => &["Refresh the page", "Contact support if the problem persists"],
            ErrorKind::NotFound => &["Check the address and try again"],
            ErrorKind::Conflict => &["Refresh the page and try again"],
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How urgently a failure needs operator attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
