//! Axum router configuration for credit endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_credit_history, get_credits};
use crate::adapters::http::state::AppState;

/// # Routes (require authentication)
/// - `GET /credits` - Current balance
/// - `GET /credits/history` - Transaction history
pub fn credits_routes() -> Router<AppState> {
    Router::new()
        .route("/credits", get(get_credits))
        .route("/credits/history", get(get_credit_history))
}
