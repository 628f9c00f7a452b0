//! Axum router configuration for checkout.

use axum::{routing::post, Router};

use super::handlers::create_checkout;
use crate::adapters::http::state::AppState;

/// # Routes (require authentication)
/// - `POST /creem/create-checkout` - Create a hosted checkout session
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/creem/create-checkout", post(create_checkout))
}
