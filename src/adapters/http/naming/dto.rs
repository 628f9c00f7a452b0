//! HTTP DTOs for generation history.

use serde::Serialize;

use crate::domain::naming::GenerationLogEntry;

#[derive(Debug, Clone, Serialize)]
pub struct GenerationLogsResponse {
    pub logs: Vec<GenerationLogEntry>,
}
