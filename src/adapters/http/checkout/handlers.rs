//! HTTP handlers for checkout creation.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::{ApiError, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::CreateCheckoutCommand;

use super::dto::{CheckoutResponse, CreateCheckoutRequest};

/// POST /api/creem/create-checkout - Start a hosted checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_checkout_handler()
        .handle(CreateCheckoutCommand {
            user,
            selection: request.into(),
        })
        .await
        .map_err(|e| state.errors.reject(e))?;

    Ok(Json(CheckoutResponse {
        checkout_url: result.checkout_url,
    }))
}
