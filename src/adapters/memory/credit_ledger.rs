//! In-memory credit ledger for tests and local development.
//!
//! Same atomic semantics as the Postgres adapter: the balance check, the
//! decrement and the history append happen under one lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::credits::{
    Charge, ChargeReceipt, CreditBalance, CreditTransaction, LedgerError,
};
use crate::domain::foundation::{CustomerId, Timestamp, UserId};
use crate::ports::CreditLedger;

#[derive(Debug, Default)]
struct LedgerState {
    customers: HashMap<UserId, CreditBalance>,
    /// Oldest first.
    history: Vec<CreditTransaction>,
    fail_charges: Option<String>,
    fail_reads: Option<String>,
}

/// Credit ledger held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCreditLedger {
    state: Mutex<LedgerState>,
}

impl InMemoryCreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a customer with a starting balance.
    pub fn with_customer(mut self, user_id: UserId, credits: u32) -> Self {
        self.state.get_mut().customers.insert(
            user_id.clone(),
            CreditBalance::new(CustomerId::new(), user_id, credits),
        );
        self
    }

    /// Seeds a customer on a shared instance.
    pub async fn insert_customer(&self, user_id: UserId, credits: u32) {
        let mut state = self.state.lock().await;
        state.customers.insert(
            user_id.clone(),
            CreditBalance::new(CustomerId::new(), user_id, credits),
        );
    }

    /// Makes every subsequent charge fail with a storage error.
    pub async fn fail_charges(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_charges = Some(reason.into());
    }

    /// Makes every subsequent balance read fail with a storage error.
    pub async fn fail_reads(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_reads = Some(reason.into());
    }

    /// Sets a balance directly, bypassing history. Simulates a concurrent
    /// spend by another process.
    pub async fn overwrite_balance(&self, user_id: &UserId, credits: u32) {
        let mut state = self.state.lock().await;
        if let Some(balance) = state.customers.get_mut(user_id) {
            balance.credits = credits;
            balance.updated_at = Timestamp::now();
        }
    }

    /// Every transaction recorded for the user, oldest first.
    pub async fn transactions_for(&self, user_id: &UserId) -> Vec<CreditTransaction> {
        self.state
            .lock()
            .await
            .history
            .iter()
            .filter(|tx| &tx.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn balance(&self, user_id: &UserId) -> Result<Option<CreditBalance>, LedgerError> {
        let state = self.state.lock().await;
        if let Some(reason) = &state.fail_reads {
            return Err(LedgerError::storage(reason.clone()));
        }
        Ok(state.customers.get(user_id).cloned())
    }

    async fn charge(&self, charge: Charge) -> Result<ChargeReceipt, LedgerError> {
        if charge.amount == 0 {
            return Err(LedgerError::InvalidAmount(0));
        }

        let mut state = self.state.lock().await;
        if let Some(reason) = state.fail_charges.clone() {
            return Err(LedgerError::storage(reason));
        }

        let balance = state
            .customers
            .get_mut(&charge.user_id)
            .ok_or_else(|| LedgerError::CustomerNotFound(charge.user_id.clone()))?;

        let before = balance.credits;
        let after = before
            .checked_sub(charge.amount)
            .ok_or_else(|| LedgerError::insufficient(charge.amount, before))?;
        balance.credits = after;
        balance.updated_at = Timestamp::now();
        let customer_id = balance.customer_id;

        let transaction = CreditTransaction::subtract(
            customer_id,
            charge.user_id.clone(),
            charge.amount,
            charge.description.clone(),
            charge.metadata_with_balances(before, after),
        );
        state.history.push(transaction.clone());

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
        let state = self.state.lock().await;
        Ok(state
            .history
            .iter()
            .rev()
            .filter(|tx| &tx.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
