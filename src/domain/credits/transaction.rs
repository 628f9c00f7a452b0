//! Append-only credit transactions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::LedgerError;
use crate::domain::foundation::{CustomerId, Timestamp, TransactionId, UserId};

/// Direction of a credit movement, stored as the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Add,
    Subtract,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Add => "add",
            TransactionType::Subtract => "subtract",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(TransactionType::Add),
            "subtract" => Ok(TransactionType::Subtract),
            other => Err(LedgerError::storage(format!(
                "unknown transaction type '{}'",
                other
            ))),
        }
    }
}

/// One row of credit history. Never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditTransaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub user_id: UserId,
    pub amount: u32,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub metadata: Value,
    pub created_at: Timestamp,
}

impl CreditTransaction {
    /// Records a debit against a customer.
    pub fn subtract(
        customer_id: CustomerId,
        user_id: UserId,
        amount: u32,
        description: impl Into<String>,
        metadata: Value,
    ) -> Self {
        Self::record(customer_id, user_id, amount, TransactionType::Subtract, description, metadata)
    }

    /// Records a credit to a customer (purchases, grants).
    pub fn add(
        customer_id: CustomerId,
        user_id: UserId,
        amount: u32,
        description: impl Into<String>,
        metadata: Value,
    ) -> Self {
        Self::record(customer_id, user_id, amount, TransactionType::Add, description, metadata)
    }

    fn record(
        customer_id: CustomerId,
        user_id: UserId,
        amount: u32,
        kind: TransactionType,
        description: impl Into<String>,
        metadata: Value,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            customer_id,
            user_id,
            amount,
            kind,
            description: description.into(),
            metadata,
            created_at: Timestamp::now(),
        }
    }

    /// Signed effect on the balance.
    pub fn delta(&self) -> i64 {
        match self.kind {
            TransactionType::Add => i64::from(self.amount),
            TransactionType::Subtract => -i64::from(self.amount),
        }
    }
}
