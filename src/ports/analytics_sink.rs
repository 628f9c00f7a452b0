//! Analytics sink port.
//!
//! Destination for validated client analytics batches. Recording is
//! fire-and-forget from the client's perspective.

use async_trait::async_trait;

use crate::domain::analytics::AnalyticsBatch;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, batch: AnalyticsBatch) -> Result<(), DomainError>;
}
