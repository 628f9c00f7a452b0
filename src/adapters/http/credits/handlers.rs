//! HTTP handlers for credit balance and history.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{GetCreditHistoryQuery, GetCreditsQuery};

use super::dto::{CreditHistoryResponse, CreditsResponse, ListParams};

/// GET /api/credits - Current balance
pub async fn get_credits(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .get_credits_handler()
        .handle(GetCreditsQuery { user_id: user.id })
        .await
        .map_err(|e| state.errors.reject(e))?;

    Ok(Json(CreditsResponse {
        credits: result.credits,
        updated_at: result.updated_at,
    }))
}

/// GET /api/credits/history - Recent transactions, newest first
pub async fn get_credit_history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state
        .get_credit_history_handler()
        .handle(GetCreditHistoryQuery {
            user_id: user.id,
            limit: params.limit,
        })
        .await
        .map_err(|e| state.errors.reject(e))?;

    Ok(Json(CreditHistoryResponse { transactions }))
}
