//! HTTP handlers for certificate export.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{ApiError, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::GeneratePdfCommand;
use crate::domain::foundation::ValidationError;

use super::dto::{GeneratePdfRequest, CREDITS_REMAINING_HEADER};

/// POST /api/generate-pdf - Render and charge a name certificate
pub async fn generate_pdf(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<GeneratePdfRequest>,
) -> Result<Response, ApiError> {
    let name_data = request
        .name_data
        .ok_or_else(|| state.errors.reject(ValidationError::empty_field("nameData")))?;
    let user_data = request
        .user_data
        .ok_or_else(|| state.errors.reject(ValidationError::empty_field("userData")))?;

    let result = state
        .generate_pdf_handler()
        .handle(GeneratePdfCommand {
            user_id: user.id,
            name_data,
            user_data,
        })
        .await
        .map_err(|e| state.errors.reject(e))?;

    let disposition = format!("attachment; filename=\"{}\"", result.file_name);
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"))],
        result.pdf,
    )
        .into_response();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    if let Some(remaining) = result.remaining_credits {
        headers.insert(CREDITS_REMAINING_HEADER, HeaderValue::from(remaining));
    }
    Ok(response)
}
