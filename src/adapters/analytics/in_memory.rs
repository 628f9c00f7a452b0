//! Analytics sink that keeps batches in memory for assertions.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::analytics::AnalyticsBatch;
use crate::domain::foundation::DomainError;
use crate::ports::AnalyticsSink;

#[derive(Debug, Default)]
pub struct InMemoryAnalyticsSink {
    batches: Mutex<Vec<AnalyticsBatch>>,
}

impl InMemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn batches(&self) -> Vec<AnalyticsBatch> {
        self.batches.lock().await.clone()
    }
}

#[async_trait]
impl AnalyticsSink for InMemoryAnalyticsSink {
    async fn record(&self, batch: AnalyticsBatch) -> Result<(), DomainError> {
        self.batches.lock().await.push(batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analytics::TracingAnalyticsSink;
    use serde_json::json;

    fn batch() -> AnalyticsBatch {
        AnalyticsBatch::from_payload(&json!({
            "type": "events",
            "data": [{ "name": "generate_clicked" }],
            "timestamp": 1_700_000_000_000i64
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn keeps_recorded_batches() {
        let sink = InMemoryAnalyticsSink::new();
        sink.record(batch()).await.unwrap();
        sink.record(batch()).await.unwrap();
        assert_eq!(sink.batches().await.len(), 2);
    }

    #[tokio::test]
    async fn tracing_sink_accepts_batches() {
        assert!(TracingAnalyticsSink::new().record(batch()).await.is_ok());
    }
}
