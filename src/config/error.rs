//! Configuration error types

use thiserror::Error;

use crate::domain::billing::CatalogError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Cannot read product catalog {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("Invalid listen address")]
    InvalidAddress,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Supabase URL must use HTTPS in production")]
    SupabaseUrlMustBeHttps,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Cache TTL and sweep interval must be positive")]
    InvalidCacheTiming,

    #[error("PDF credit cost must be at least 1")]
    InvalidCreditCost,
}
