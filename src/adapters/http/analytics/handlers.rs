//! HTTP handler for client analytics.

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde_json::{json, Value};

use crate::adapters::http::error::{ApiError, ApiJson};
use crate::adapters::http::state::AppState;
use crate::application::handlers::IngestAnalyticsCommand;

/// POST /api/analytics - Accept a batch of client events
///
/// Public; the payload shape is checked by `AnalyticsBatch`.
pub async fn ingest_analytics(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ingest_analytics_handler()
        .handle(IngestAnalyticsCommand { payload })
        .await
        .map_err(|e| state.errors.reject(e))?;

    Ok(Json(json!({ "success": true })))
}
