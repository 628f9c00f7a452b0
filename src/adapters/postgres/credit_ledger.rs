//! PostgreSQL implementation of CreditLedger.
//!
//! The charge is one database transaction: a conditional decrement that only
//! matches when the balance covers the amount, followed by the history
//! insert. Concurrent charges serialize on the customer row, and the
//! `CHECK (credits >= 0)` constraint backs the condition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::credits::{
    Charge, ChargeReceipt, CreditBalance, CreditTransaction, LedgerError, TransactionType,
};
use crate::domain::foundation::{CustomerId, Timestamp, TransactionId, UserId};
use crate::ports::CreditLedger;

/// PostgreSQL implementation of the CreditLedger port.
#[derive(Clone)]
pub struct PostgresCreditLedger {
    pool: PgPool,
}

impl PostgresCreditLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    user_id: String,
    credits: i32,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for CreditBalance {
    type Error = LedgerError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(CreditBalance {
            customer_id: CustomerId::from_uuid(row.id),
            user_id: parse_user_id(row.user_id)?,
            credits: to_credits(row.credits)?,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    id: Uuid,
    customer_id: Uuid,
    user_id: String,
    amount: i32,
    #[sqlx(rename = "type")]
    kind: String,
    description: String,
    metadata: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<HistoryRow> for CreditTransaction {
    type Error = LedgerError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(CreditTransaction {
            id: TransactionId::from_uuid(row.id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            user_id: parse_user_id(row.user_id)?,
            amount: to_credits(row.amount)?,
            kind: row.kind.parse::<TransactionType>()?,
            description: row.description,
            metadata: row.metadata,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_user_id(raw: String) -> Result<UserId, LedgerError> {
    UserId::new(raw).map_err(|e| LedgerError::storage(format!("Invalid user_id: {}", e)))
}

fn to_credits(value: i32) -> Result<u32, LedgerError> {
    u32::try_from(value)
        .map_err(|_| LedgerError::storage(format!("Negative credit value in storage: {}", value)))
}

fn to_column(amount: u32) -> Result<i32, LedgerError> {
    i32::try_from(amount).map_err(|_| LedgerError::InvalidAmount(i64::from(amount)))
}

fn db_error(context: &str, e: sqlx::Error) -> LedgerError {
    LedgerError::storage(format!("{}: {}", context, e))
}

#[async_trait]
impl CreditLedger for PostgresCreditLedger {
    async fn balance(&self, user_id: &UserId) -> Result<Option<CreditBalance>, LedgerError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, credits, updated_at
            FROM customers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read balance", e))?;

        row.map(CreditBalance::try_from).transpose()
    }

    async fn charge(&self, charge: Charge) -> Result<ChargeReceipt, LedgerError> {
        if charge.amount == 0 {
            return Err(LedgerError::InvalidAmount(0));
        }
        let amount = to_column(charge.amount)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin charge", e))?;

        let updated = sqlx::query(
            r#"
            UPDATE customers
            SET credits = credits - $2, updated_at = NOW()
            WHERE user_id = $1 AND credits >= $2
            RETURNING id, credits
            "#,
        )
        .bind(charge.user_id.as_str())
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to debit credits", e))?;

        let Some(updated) = updated else {
            // Nothing matched: either no customer or not enough credits.
            // Dropping `tx` rolls back.
            let current: Option<i32> =
                sqlx::query_scalar("SELECT credits FROM customers WHERE user_id = $1")
                    .bind(charge.user_id.as_str())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to read balance", e))?;
            return Err(match current {
                None => LedgerError::CustomerNotFound(charge.user_id.clone()),
                Some(current) => LedgerError::insufficient(charge.amount, to_credits(current)?),
            });
        };

        let customer_id = CustomerId::from_uuid(updated.get::<Uuid, _>("id"));
        let after = to_credits(updated.get::<i32, _>("credits"))?;
        let before = after + charge.amount;

        let transaction = CreditTransaction::subtract(
            customer_id,
            charge.user_id.clone(),
            charge.amount,
            charge.description.clone(),
            charge.metadata_with_balances(before, after),
        );

        sqlx::query(
            r#"
            INSERT INTO credits_history (id, customer_id, amount, type, description, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(customer_id.as_uuid())
        .bind(amount)
        .bind(transaction.kind.as_str())
        .bind(&transaction.description)
        .bind(&transaction.metadata)
        .bind(transaction.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to record credit history", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit charge", e))?;

        Ok(ChargeReceipt {
            transaction,
            balance_before: before,
            balance_after: after,
        })
    }

    async fn history(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<CreditTransaction>, LedgerError> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            r#"
            SELECT h.id, h.customer_id, c.user_id, h.amount, h.type, h.description,
                   h.metadata, h.created_at
            FROM credits_history h
            JOIN customers c ON c.id = h.customer_id
            WHERE c.user_id = $1
            ORDER BY h.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read credit history", e))?;

        rows.into_iter().map(CreditTransaction::try_from).collect()
    }
}
