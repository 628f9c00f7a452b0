//! Axum router configuration for analytics.

use axum::{routing::post, Router};

use super::handlers::ingest_analytics;
use crate::adapters::http::state::AppState;

/// # Routes (public)
/// - `POST /analytics` - Ingest a batch of client events
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/analytics", post(ingest_analytics))
}
