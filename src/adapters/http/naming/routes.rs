//! Axum router configuration for generation history.

use axum::{routing::get, Router};

use super::handlers::list_generation_logs;
use crate::adapters::http::state::AppState;

/// # Routes (require authentication)
/// - `GET /name-generation-logs` - Generation history
pub fn naming_routes() -> Router<AppState> {
    Router::new().route("/name-generation-logs", get(list_generation_logs))
}
