//! Per-request context extractor

use axum::{extract::FromRequestParts, http::request::Parts};

use core_kernel::OperationMetadata;
use domain_customer::CustomerError;

use crate::auth::{self, Claims};
use crate::error::{original_path, ApiError, ErrorContext};
use crate::AppState;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authenticated caller, negotiated locale, and operation metadata
///
/// Only available behind [`crate::middleware::auth_middleware`], which
/// places the validated [`Claims`] in the request extensions.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub claims: Claims,
    pub errors: ErrorContext,
    pub metadata: OperationMetadata,
}

impl RequestContext {
    /// Fails with a 403 problem unless the caller holds `permission`
    pub fn require(&self, permission: &str) -> Result<(), ApiError> {
        auth::require_role(&self.claims, permission)
            .map_err(|e| self.fail(CustomerError::PermissionDenied(e.to_string())))
    }

    /// Translates a domain error into a localised problem
    pub fn fail(&self, error: CustomerError) -> ApiError {
        self.errors.customer(error)
    }

    /// Operation metadata handed to the service
    pub fn metadata(&self) -> Option<OperationMetadata> {
        Some(self.metadata.clone())
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let path = original_path(&parts.extensions, &parts.uri);
        let errors = ErrorContext::from_request(&parts.headers, path.clone(), state.catalog.clone());

        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| errors.unauthorized())?;

        let mut metadata = OperationMetadata::initiated_by(claims.sub.clone())
            .with_context("method", parts.method.as_str())
            .with_context("route", path);
        metadata.correlation_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            claims,
            errors,
            metadata,
        })
    }
}
