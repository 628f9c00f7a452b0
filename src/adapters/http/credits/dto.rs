//! HTTP DTOs for credit balance and history.

use serde::{Deserialize, Serialize};

use crate::domain::credits::CreditTransaction;
use crate::domain::foundation::Timestamp;

/// `?limit=` on list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditsResponse {
    pub credits: u32,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditHistoryResponse {
    pub transactions: Vec<CreditTransaction>,
}
