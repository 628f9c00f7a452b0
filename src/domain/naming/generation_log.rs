use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{Timestamp, UserId};

/// One past name generation, read from `name_generation_logs`.
///
/// Rows are written by the generation pipeline; this service only reads them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationLogEntry {
    pub id: String,
    pub user_id: UserId,
    /// Request parameters as submitted (name, preferences).
    pub input: Value,
    /// Names returned to the user.
    pub result: Value,
    pub created_at: Timestamp,
}

/// Default and maximum page sizes for log and history listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamps a client-supplied page size into `1..=MAX_PAGE_SIZE`.
pub fn page_size(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}
