//! Axum router configuration for certificate export.

use axum::{routing::post, Router};

use super::handlers::generate_pdf;
use crate::adapters::http::state::AppState;

/// # Routes (require authentication)
/// - `POST /generate-pdf` - Render a certificate for one credit
pub fn pdf_routes() -> Router<AppState> {
    Router::new().route("/generate-pdf", post(generate_pdf))
}
