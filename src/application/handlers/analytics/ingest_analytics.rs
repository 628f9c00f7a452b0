//! IngestAnalyticsHandler - Command handler for client analytics batches.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::analytics::AnalyticsBatch;
use crate::domain::failure::AppError;
use crate::ports::AnalyticsSink;

#[derive(Debug, Clone)]
pub struct IngestAnalyticsCommand {
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestAnalyticsResult {
    pub accepted: usize,
}

pub struct IngestAnalyticsHandler {
    sink: Arc<dyn AnalyticsSink>,
}

impl IngestAnalyticsHandler {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    pub async fn handle(
        &self,
        cmd: IngestAnalyticsCommand,
    ) -> Result<IngestAnalyticsResult, AppError> {
        let batch = AnalyticsBatch::from_payload(&cmd.payload)?;
        let accepted = batch.len();
        self.sink.record(batch).await?;
        Ok(IngestAnalyticsResult { accepted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analytics::InMemoryAnalyticsSink;
    use crate::domain::analytics::AnalyticsKind;
    use crate::domain::failure::ErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn valid_batch_reaches_sink() {
        let sink = Arc::new(InMemoryAnalyticsSink::new());
        let handler = IngestAnalyticsHandler::new(sink.clone());

        let result = handler
            .handle(IngestAnalyticsCommand {
                payload: json!({
                    "type": "page_views",
                    "data": [{ "path": "/" }, { "path": "/pricing" }],
                    "timestamp": "2024-05-01T12:00:00Z"
                }),
            })
            .await
            .unwrap();

        assert_eq!(result.accepted, 2);
        let batches = sink.batches().await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].kind, AnalyticsKind::PageViews);
    }

    #[tokio::test]
    async fn malformed_batch_is_validation_error() {
        let sink = Arc::new(InMemoryAnalyticsSink::new());
        let handler = IngestAnalyticsHandler::new(sink.clone());

        let err = handler
            .handle(IngestAnalyticsCommand {
                payload: json!({ "type": "events", "data": "nope", "timestamp": 1 }),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(sink.batches().await.is_empty());
    }
}
