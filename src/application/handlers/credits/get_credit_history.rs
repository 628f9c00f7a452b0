//! GetCreditHistoryHandler - Query handler for the user's transactions.

use std::sync::Arc;

use crate::domain::credits::CreditTransaction;
use crate::domain::failure::AppError;
use crate::domain::foundation::UserId;
use crate::domain::naming::page_size;
use crate::ports::CreditLedger;

#[derive(Debug, Clone)]
pub struct GetCreditHistoryQuery {
    pub user_id: UserId,
    pub limit: Option<u32>,
}

pub struct GetCreditHistoryHandler {
    ledger: Arc<dyn CreditLedger>,
}

impl GetCreditHistoryHandler {
    pub fn new(ledger: Arc<dyn CreditLedger>) -> Self {
        Self { ledger }
    }

    /// Newest first, at most `MAX_PAGE_SIZE` rows.
    pub async fn handle(
        &self,
        query: GetCreditHistoryQuery,
    ) -> Result<Vec<CreditTransaction>, AppError> {
        let limit = page_size(query.limit);
        Ok(self.ledger.history(&query.user_id, limit).await?)
    }
}
