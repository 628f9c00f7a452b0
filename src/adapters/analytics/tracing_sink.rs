//! Analytics sink that emits each batch as a structured `tracing` event.
//!
//! Log shippers pick these up from the JSON log stream under the
//! `mingzi::analytics` target.

use async_trait::async_trait;

use crate::domain::analytics::AnalyticsBatch;
use crate::domain::foundation::DomainError;
use crate::ports::AnalyticsSink;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalyticsSink;

impl TracingAnalyticsSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalyticsSink for TracingAnalyticsSink {
    async fn record(&self, batch: AnalyticsBatch) -> Result<(), DomainError> {
        let entries = serde_json::to_string(&batch.entries).unwrap_or_default();
        tracing::info!(
            target: "mingzi::analytics",
            kind = batch.kind.as_str(),
            count = batch.len(),
            sent_at = %batch.sent_at.to_rfc3339(),
            received_at = %batch.received_at.to_rfc3339(),
            entries = %entries,
            "Analytics batch received"
        );
        Ok(())
    }
}
