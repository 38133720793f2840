//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::Claims;
use crate::error::{original_path, ApiError, ErrorContext};
use crate::AppState;

/// Header selecting the API version
pub const API_VERSION_HEADER: &str = "x-api-version";

/// The only API version served
pub const API_VERSION: &str = "v1";

/// Authentication middleware
///
/// Validates JWT tokens and extracts user claims
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let path = original_path(request.extensions(), request.uri());
    let errors = ErrorContext::from_request(request.headers(), path.clone(), state.catalog.clone());

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        warn!(uri = %path, "Missing or invalid Authorization header");
        return Err(errors.unauthorized());
    };

    match crate::auth::validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!(error = %e, "Token validation failed");
            Err(errors.unauthorized())
        }
    }
}

/// API version middleware
///
/// Customer routes only match when `X-Api-Version: v1` is sent; any other
/// value, or none, is answered as an unknown endpoint.
pub async fn api_version_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let version = request
        .headers()
        .get(API_VERSION_HEADER)
        .and_then(|h| h.to_str().ok());

    if version.map(str::trim) == Some(API_VERSION) {
        return Ok(next.run(request).await);
    }

    let path = original_path(request.extensions(), request.uri());
    warn!(requested = ?version, uri = %path, "Unsupported API version");
    let errors = ErrorContext::from_request(request.headers(), path, state.catalog.clone());
    Err(errors.unsupported_api_version())
}

/// Audit logging middleware
///
/// Logs all API requests for compliance and debugging
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = original_path(request.extensions(), request.uri());
    let user_id = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.sub.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
