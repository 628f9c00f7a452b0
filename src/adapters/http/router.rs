//! Top-level router assembly.
//!
//! ```text
//! /health                        public
//! /api/analytics                 public
//! /api/generate-pdf              auth
//! /api/creem/create-checkout     auth
//! /api/credits, /credits/history auth
//! /api/name-generation-logs      auth
//! ```

use std::any::Any as PanicPayload;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Json, Router,
};
use serde_json::{json, Value};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::analytics::analytics_routes;
use super::error::ApiError;
use super::checkout::checkout_routes;
use super::credits::credits_routes;
use super::middleware::auth_middleware;
use super::naming::naming_routes;
use super::pdf::dto::CREDITS_REMAINING_HEADER;
use super::pdf::pdf_routes;
use super::state::AppState;
use crate::domain::failure::{AppError, ErrorClassifier, ErrorKind};

/// Default whole-request timeout. Leaves room for a slow PDF render.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Cross-cutting router settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed browser origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub cors_max_age: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cors_max_age: Duration::from_secs(3600),
        }
    }
}

/// Builds the complete application router.
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let protected = Router::new()
        .merge(pdf_routes())
        .merge(checkout_routes())
        .merge(credits_routes())
        .merge(naming_routes())
        .route_layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ));

    let api = Router::new().merge(protected).merge(analytics_routes());

    let x_request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(build_cors_layer(config))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Failures raised by tower layers rather than handlers.
async fn handle_layer_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        return ApiError::public(
            AppError::new(ErrorKind::Network, "request exceeded the server timeout")
                .with_code("TIMEOUT")
                .with_status(504)
                .with_retryable(true),
        );
    }
    ApiError::public(ErrorClassifier::classify(&*err, Some("middleware")))
}

fn handle_panic(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    ApiError::public(ErrorClassifier::unclassified(format!("handler panicked: {}", detail)))
        .into_response()
}

fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([
            HeaderName::from_static(CREDITS_REMAINING_HEADER),
            header::CONTENT_DISPOSITION,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(config.cors_max_age);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: restricted origins");
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
