//! Ledger error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | CustomerNotFound | 404 |
//! | InsufficientCredits | 403 |
//! | InvalidAmount | 400 |
//! | Storage | 500 |

use thiserror::Error;

use crate::domain::foundation::UserId;

/// Errors raised by balance reads, charges and history replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No customer row exists for the user.
    #[error("Customer not found for user {0}")]
    CustomerNotFound(UserId),

    /// Balance does not cover the requested amount.
    #[error("Insufficient credits: required {required}, current {current}")]
    InsufficientCredits { required: u32, current: u32 },

    /// Amounts must be positive integers.
    #[error("Invalid credit amount: {0}")]
    InvalidAmount(i64),

    /// The backing store failed.
    #[error("Ledger storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn insufficient(required: u32, current: u32) -> Self {
        LedgerError::InsufficientCredits { required, current }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        LedgerError::Storage(message.into())
    }

    /// Returns true when the failure came from infrastructure rather than
    /// from the customer's balance.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, LedgerError::Storage(_))
    }
}
