//! HTTP handlers for generation history.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::credits::dto::ListParams;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::ListGenerationLogsQuery;

use super::dto::GenerationLogsResponse;

/// GET /api/name-generation-logs - Past generations, newest first
pub async fn list_generation_logs(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = state
        .list_generation_logs_handler()
        .handle(ListGenerationLogsQuery {
            user_id: user.id,
            limit: params.limit,
        })
        .await
        .map_err(|e| state.errors.reject(e))?;

    Ok(Json(GenerationLogsResponse { logs }))
}
