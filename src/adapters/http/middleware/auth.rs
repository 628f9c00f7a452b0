//! Bearer authentication for the `/api` routes that cost or show credits.
//!
//! `auth_middleware` is installed with `route_layer` on the protected
//! router only, so every request it sees must carry a valid token. On
//! success the `AuthenticatedUser` rides along in request extensions and
//! handlers take it with `RequireAuth`.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

pub type AuthState = Arc<dyn SessionValidator>;

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        Some(_) => Err(AuthError::MissingToken),
        None => Err(AuthError::InvalidToken),
    }
}

pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = match bearer_token(request.headers()) {
        Ok(token) => validator.validate(token).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(reason)) => {
            tracing::error!(%reason, "session validator unavailable");
            ApiError::public(AuthError::ServiceUnavailable(reason)).into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "request rejected at auth");
            ApiError::public(e).into_response()
        }
    }
}

/// The caller attached by `auth_middleware`.
///
/// Only usable on routes behind the middleware; elsewhere it rejects with 401.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => Ok(RequireAuth(user.clone())),
            None => Err(ApiError::public(AuthError::MissingToken)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn buyer() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("buyer-7").unwrap(), "buyer@example.com", None)
    }

    fn app(validator: MockSessionValidator) -> Router {
        let validator: AuthState = Arc::new(validator);
        Router::new()
            .route(
                "/api/credits",
                get(|RequireAuth(user): RequireAuth| async move { user.id.to_string() }),
            )
            .route_layer(middleware::from_fn_with_state(validator, auth_middleware))
            .route("/api/analytics", get(|| async { "open" }))
    }

    async fn call(app: Router, uri: &str, authorization: Option<&str>) -> StatusCode {
        let mut req = axum::http::Request::builder().uri(uri);
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        app.oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingToken));

        headers.insert(header::AUTHORIZATION, "Bearer  tok-1 ".parse().unwrap());
        assert_eq!(bearer_token(&headers), Ok("tok-1"));

        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::InvalidToken));

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingToken));
    }

    #[tokio::test]
    async fn known_token_reaches_handler() {
        let validator = MockSessionValidator::new().with_user("tok-1", buyer());
        assert_eq!(
            call(app(validator), "/api/credits", Some("Bearer tok-1")).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn protected_route_without_token_is_401() {
        assert_eq!(
            call(app(MockSessionValidator::new()), "/api/credits", None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn unknown_token_is_401() {
        assert_eq!(
            call(app(MockSessionValidator::new()), "/api/credits", Some("Bearer nope")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn unprotected_route_ignores_auth() {
        assert_eq!(
            call(app(MockSessionValidator::new()), "/api/analytics", None).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn extractor_without_middleware_rejects() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/x")
            .body(())
            .unwrap()
            .into_parts();
        let err = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
