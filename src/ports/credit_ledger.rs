//! Credit ledger port.
//!
//! The ledger owns customer balances and the append-only credit history.
//! The balance is a materialized view of the history; every implementation
//! must keep the two consistent.

use async_trait::async_trait;

use crate::domain::credits::{Charge, ChargeReceipt, CreditBalance, CreditTransaction, LedgerError};
use crate::domain::foundation::UserId;

/// Reads balances and records charges.
///
/// # Contract
///
/// `charge` must be atomic: the conditional decrement (only when the balance
/// covers the amount) and the history append either both happen or neither
/// does. A balance that no longer covers the amount yields
/// `LedgerError::InsufficientCredits` and leaves no trace. Implementations
/// never retry.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Current balance, or `None` if the user has no customer row.
    async fn balance(&self, user_id: &UserId) -> Result<Option<CreditBalance>, LedgerError>;

    /// Debits `charge.amount` credits and appends a `subtract` row.
    async fn charge(&self, charge: Charge) -> Result<ChargeReceipt, LedgerError>;

    /// Most recent history rows, newest first.
    async fn history(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<CreditTransaction>, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_ledger_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CreditLedger>();
    }
}
