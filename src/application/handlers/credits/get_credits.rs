//! GetCreditsHandler - Query handler for the current balance.
//!
//! Read-through cached. The entitlement gate never reads this cache; it
//! only serves the balance shown in the UI.

use std::sync::Arc;

use crate::application::cache_keys::{credits_key, CachedValue, SharedCache};
use crate::domain::failure::AppError;
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::CreditLedger;

#[derive(Debug, Clone)]
pub struct GetCreditsQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetCreditsResult {
    pub credits: u32,
    /// None when the user has no billing account yet.
    pub updated_at: Option<Timestamp>,
}

pub struct GetCreditsHandler {
    ledger: Arc<dyn CreditLedger>,
    cache: SharedCache,
}

impl GetCreditsHandler {
    pub fn new(ledger: Arc<dyn CreditLedger>, cache: SharedCache) -> Self {
        Self { ledger, cache }
    }

    pub async fn handle(&self, query: GetCreditsQuery) -> Result<GetCreditsResult, AppError> {
        let key = credits_key(&query.user_id);
        if let Some(CachedValue::Balance(balance)) = self.cache.get(&key) {
            return Ok(GetCreditsResult {
                credits: balance.credits,
                updated_at: Some(balance.updated_at),
            });
        }

        match self.ledger.balance(&query.user_id).await? {
            Some(balance) => {
                let result = GetCreditsResult {
                    credits: balance.credits,
                    updated_at: Some(balance.updated_at),
                };
                self.cache.set(&key, CachedValue::Balance(balance), None);
                Ok(result)
            }
            None => Ok(GetCreditsResult {
                credits: 0,
                updated_at: None,
            }),
        }
    }
}
