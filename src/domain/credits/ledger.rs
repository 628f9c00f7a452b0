//! Charges, receipts and history replay.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{CreditTransaction, LedgerError, TransactionType};
use crate::domain::foundation::UserId;

/// A request to debit credits for a completed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub user_id: UserId,
    pub amount: u32,
    pub description: String,
    pub metadata: Value,
}

impl Charge {
    /// Creates a charge. Zero is rejected; every charge moves at least one credit.
    pub fn new(
        user_id: UserId,
        amount: u32,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount(0));
        }
        Ok(Self {
            user_id,
            amount,
            description: description.into(),
            metadata: Value::Object(Map::new()),
        })
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Metadata written to the history row: the caller's fields plus the
    /// balance observed inside the charging transaction.
    pub fn metadata_with_balances(&self, before: u32, after: u32) -> Value {
        let mut map = match &self.metadata {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("context".to_string(), other.clone());
                map
            }
        };
        map.insert("balance_before".to_string(), Value::from(before));
        map.insert("balance_after".to_string(), Value::from(after));
        Value::Object(map)
    }
}

/// Result of a successful charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeReceipt {
    pub transaction: CreditTransaction,
    pub balance_before: u32,
    pub balance_after: u32,
}

/// Reconstructs a balance by applying `history` (oldest first) to `initial`.
///
/// Fails if any debit would take the balance below zero, which can only
/// happen if the stored history is inconsistent.
pub fn replay(initial: u32, history: &[CreditTransaction]) -> Result<u32, LedgerError> {
    history.iter().try_fold(initial, |balance, tx| match tx.kind {
        TransactionType::Add => balance
            .checked_add(tx.amount)
            .ok_or(LedgerError::InvalidAmount(i64::from(tx.amount))),
        TransactionType::Subtract => balance
            .checked_sub(tx.amount)
            .ok_or(LedgerError::insufficient(tx.amount, balance)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CustomerId;
    use proptest::prelude::*;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn charge_rejects_zero_amount() {
        assert_eq!(
            Charge::new(user(), 0, "pdf").unwrap_err(),
            LedgerError::InvalidAmount(0)
        );
    }

    #[test]
    fn metadata_with_balances_keeps_caller_fields() {
        let charge = Charge::new(user(), 1, "pdf")
            .unwrap()
            .with_metadata(json!({ "operation": "pdf_export" }));

        let meta = charge.metadata_with_balances(5, 4);
        assert_eq!(meta["operation"], "pdf_export");
        assert_eq!(meta["balance_before"], 5);
        assert_eq!(meta["balance_after"], 4);
    }

    #[test]
    fn metadata_with_balances_wraps_non_object_metadata() {
        let charge = Charge::new(user(), 1, "pdf").unwrap().with_metadata(json!("raw"));
        let meta = charge.metadata_with_balances(1, 0);
        assert_eq!(meta["context"], "raw");
    }

    #[test]
    fn replay_applies_history_in_order() {
        let customer = CustomerId::new();
        let history = vec![
            CreditTransaction::add(customer, user(), 10, "purchase", json!({})),
            CreditTransaction::subtract(customer, user(), 1, "pdf", json!({})),
            CreditTransaction::subtract(customer, user(), 2, "pdf", json!({})),
        ];
        assert_eq!(replay(0, &history).unwrap(), 7);
    }

    #[test]
    fn replay_rejects_overdraft() {
        let history = vec![CreditTransaction::subtract(
            CustomerId::new(),
            user(),
            2,
            "pdf",
            json!({}),
        )];
        assert_eq!(replay(1, &history), Err(LedgerError::insufficient(2, 1)));
    }

    proptest! {
        #[test]
        fn accepted_debits_never_overdraw(initial in 0u32..50, amounts in prop::collection::vec(1u32..5, 0..40)) {
            // Simulates the conditional decrement: a debit only lands when covered.
            let customer = CustomerId::new();
            let mut balance = initial;
            let mut history = Vec::new();
            for amount in amounts {
                if balance >= amount {
                    balance -= amount;
                    history.push(CreditTransaction::subtract(customer, user(), amount, "op", json!({})));
                }
            }
            prop_assert_eq!(replay(initial, &history).unwrap(), balance);
        }
    }
}
