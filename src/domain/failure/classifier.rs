//! Heuristic classification of untyped failures.
//!
//! Typed errors convert through their `From` impls. Anything else is matched
//! by keyword against its lowercased message and an optional context string.
//! The rule order is fixed and first match wins, so the same input always
//! yields the same classification.

use once_cell::sync::Lazy;
use std::error::Error;

use super::{AppError, ErrorKind, Severity};

struct Rule {
    kind: ErrorKind,
    keywords: &'static [&'static str],
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule {
            kind: ErrorKind::Authentication,
            keywords: &[
                "unauthorized",
                "unauthenticated",
                "authentication",
                "not authenticated",
                "invalid token",
                "jwt",
                "session expired",
            ],
        },
        Rule {
            kind: ErrorKind::Authorization,
            keywords: &["forbidden", "permission", "access denied", "not allowed"],
        },
        Rule {
            kind: ErrorKind::RateLimit,
            keywords: &["rate limit", "too many requests", "429"],
        },
        Rule {
            kind: ErrorKind::Payment,
            keywords: &["payment", "credit", "insufficient", "billing", "subscription"],
        },
        Rule {
            kind: ErrorKind::Validation,
            keywords: &["validation", "invalid", "required", "missing"],
        },
        Rule {
            kind: ErrorKind::Network,
            keywords: &["network", "fetch", "timeout", "timed out", "econnrefused", "connection"],
        },
        Rule {
            kind: ErrorKind::Database,
            keywords: &["database", "supabase", "sql", "postgres", "query"],
        },
        Rule {
            kind: ErrorKind::ExternalService,
            keywords: &[
                "openai",
                "api",
                "service unavailable",
                "external",
                "creem",
                "chromium",
                "puppeteer",
            ],
        },
    ]
});

/// Kinds a failing backend can be blamed for. A storage error never
/// becomes the caller's fault, whatever words its message contains.
const STORAGE_KINDS: [ErrorKind; 3] = [
    ErrorKind::Network,
    ErrorKind::Database,
    ErrorKind::ExternalService,
];

/// Stateless failure classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Kind matched by the rule table, if any.
    pub fn match_kind(message: &str, context: Option<&str>) -> Option<ErrorKind> {
        let mut haystack = message.to_lowercase();
        if let Some(context) = context {
            haystack.push(' ');
            haystack.push_str(&context.to_lowercase());
        }

        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw)))
            .map(|rule| rule.kind)
    }

    /// Classifies a raw failure message. Unmatched messages become
    /// `internal` with `critical` severity.
    pub fn classify_message(message: &str, context: Option<&str>) -> AppError {
        match Self::match_kind(message, context) {
            Some(kind) => AppError::new(kind, message),
            None => Self::unclassified(message),
        }
    }

    /// The fallback for failures nothing matched, panics included.
    pub fn unclassified(message: impl Into<String>) -> AppError {
        AppError::internal(message)
            .with_severity(Severity::Critical)
            .with_suggestions(Vec::<String>::new())
    }

    /// Kind for a driver or storage failure message, restricted to the
    /// backend kinds. Defaults to `database`.
    pub fn storage_kind(message: &str) -> ErrorKind {
        let haystack = message.to_lowercase();
        RULES
            .iter()
            .filter(|rule| STORAGE_KINDS.contains(&rule.kind))
            .find(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw)))
            .map_or(ErrorKind::Database, |rule| rule.kind)
    }

    pub fn classify_storage(message: &str) -> AppError {
        AppError::new(Self::storage_kind(message), message)
    }

    /// Classifies any error. An `AppError` passes through unchanged.
    pub fn classify(err: &(dyn Error + 'static), context: Option<&str>) -> AppError {
        if let Some(app) = err.downcast_ref::<AppError>() {
            return app.clone();
        }
        Self::classify_message(&err.to_string(), context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn authentication_wins_over_validation() {
        // "invalid token" also contains "invalid"
        let err = ErrorClassifier::classify_message("Invalid token supplied", None);
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(!err.retryable);
    }

    #[test]
    fn payment_wins_over_validation() {
        let err = ErrorClassifier::classify_message("Missing credit balance", None);
        assert_eq!(err.kind, ErrorKind::Payment);
    }

    #[test]
    fn network_wins_over_database() {
        let err = ErrorClassifier::classify_message("postgres connection refused", None);
        assert_eq!(err.kind, ErrorKind::Network);
    }

    #[test]
    fn database_matches_sql_errors() {
        let err = ErrorClassifier::classify_message("duplicate key in SQL statement", None);
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.severity, Severity::High);
    }

    #[test]
    fn context_participates_in_matching() {
        let err = ErrorClassifier::classify_message("unexpected status 502", Some("creem checkout"));
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }

    #[test]
    fn rate_limit_is_detected() {
        let err = ErrorClassifier::classify_message("HTTP 429 Too Many Requests", None);
        assert_eq!(err.kind, ErrorKind::RateLimit);
        assert_eq!(err.http_status(), 429);
    }

    #[test]
    fn unmatched_defaults_to_internal_critical() {
        let err = ErrorClassifier::classify_message("something odd happened", None);
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.severity, Severity::Critical);
        assert!(err.suggestions.is_empty());
    }

    #[test]
    fn typed_error_passes_through_unchanged() {
        let original = AppError::new(ErrorKind::Conflict, "invalid state").with_code("X");
        let classified = ErrorClassifier::classify(&original, Some("database"));
        assert_eq!(classified, original);
    }

    #[test]
    fn untyped_error_is_classified_by_display() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "network unreachable");
        let classified = ErrorClassifier::classify(&io, None);
        assert_eq!(classified.kind, ErrorKind::Network);
    }

    #[test]
    fn storage_kind_skips_caller_kinds() {
        assert_eq!(
            ErrorClassifier::storage_kind("Failed to debit credits: connection reset"),
            ErrorKind::Network
        );
        assert_eq!(
            ErrorClassifier::storage_kind("invalid input syntax for type uuid"),
            ErrorKind::Database
        );
    }

    #[test]
    fn unclassified_is_internal_without_suggestions() {
        let err = ErrorClassifier::unclassified("panic: index out of bounds");
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.severity, Severity::Critical);
        assert_eq!(err.http_status(), 500);
        assert!(err.suggestions.is_empty());
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(message in ".{0,64}", context in proptest::option::of(".{0,32}")) {
            let a = ErrorClassifier::classify_message(&message, context.as_deref());
            let b = ErrorClassifier::classify_message(&message, context.as_deref());
            prop_assert_eq!(a.kind, b.kind);
            prop_assert_eq!(a.severity, b.severity);
            prop_assert_eq!(a.retryable, b.retryable);
        }

        #[test]
        fn retryable_follows_kind_default(message in "[a-z ]{0,48}") {
            let err = ErrorClassifier::classify_message(&message, None);
            prop_assert_eq!(err.retryable, err.kind.default_retryable());
        }
    }
}
