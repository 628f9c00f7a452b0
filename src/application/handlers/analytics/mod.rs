//! Analytics ingestion.

mod ingest_analytics;

pub use ingest_analytics::{IngestAnalyticsCommand, IngestAnalyticsHandler, IngestAnalyticsResult};
