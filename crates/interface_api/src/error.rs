//! API error handling
//!
//! Every failure leaves the API as an `application/problem+json` body.
//! Errors are localised where they are raised, so [`ApiError`] only carries
//! finished [`ProblemDetail`] values.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, OriginalUri},
    http::{header, Extensions, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::debug;
use unic_langid::LanguageIdentifier;

use domain_customer::{CustomerError, MessageCatalog, MessageKey, ProblemDetail};
use domain_customer::problem::PROBLEM_CONTENT_TYPE;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, or expired bearer token
    #[error("Unauthorized")]
    Unauthorized(ProblemDetail),

    /// Request body could not be read as JSON
    #[error("Bad request")]
    BadRequest(ProblemDetail),

    /// No endpoint serves the requested API version
    #[error("Not found")]
    NotFound(ProblemDetail),

    /// Domain failure translated by the customer error translator
    #[error("Customer request failed with status {}", .0.status)]
    Customer(ProblemDetail),
}

impl ApiError {
    /// Returns the problem body
    pub fn problem(&self) -> &ProblemDetail {
        match self {
            ApiError::Unauthorized(problem)
            | ApiError::BadRequest(problem)
            | ApiError::NotFound(problem)
            | ApiError::Customer(problem) => problem,
        }
    }

    fn into_problem(self) -> ProblemDetail {
        match self {
            ApiError::Unauthorized(problem)
            | ApiError::BadRequest(problem)
            | ApiError::NotFound(problem)
            | ApiError::Customer(problem) => problem,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let problem = self.into_problem();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(problem)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Path the client requested
///
/// Nested routers strip their prefix from the request URI, so the path is
/// read from [`OriginalUri`] when the router recorded one.
pub fn original_path(extensions: &Extensions, uri: &Uri) -> String {
    extensions
        .get::<OriginalUri>()
        .map(|original| original.0.path())
        .unwrap_or_else(|| uri.path())
        .to_string()
}

/// Localisation scope of a single request
///
/// Holds the negotiated locale and the request path so every error raised
/// while serving the request renders in the caller's language and names
/// the same `instance`.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    catalog: Arc<MessageCatalog>,
    locale: LanguageIdentifier,
    instance: String,
}

impl ErrorContext {
    /// Negotiates the locale from `Accept-Language`
    ///
    /// `instance` is the full request path, see [`original_path`].
    pub fn from_request(
        headers: &HeaderMap,
        instance: impl Into<String>,
        catalog: Arc<MessageCatalog>,
    ) -> Self {
        let accept_language = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        let locale = catalog.negotiate(accept_language);

        Self {
            catalog,
            locale,
            instance: instance.into(),
        }
    }

    /// Negotiated locale
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    pub fn unauthorized(&self) -> ApiError {
        ApiError::Unauthorized(self.problem(401, MessageKey::Unauthorized))
    }

    pub fn unsupported_api_version(&self) -> ApiError {
        ApiError::NotFound(self.problem(404, MessageKey::UnsupportedApiVersion))
    }

    /// Converts a JSON extractor rejection into a 400 problem
    pub fn malformed_body(&self, rejection: JsonRejection) -> ApiError {
        debug!(reason = %rejection.body_text(), instance = %self.instance, "Rejected request body");
        ApiError::BadRequest(self.problem(400, MessageKey::MalformedBody))
    }

    /// Translates a domain error
    pub fn customer(&self, error: CustomerError) -> ApiError {
        let problem = ProblemDetail::from_error(&error, &self.catalog, &self.locale)
            .with_instance(self.instance.clone());
        ApiError::Customer(problem)
    }

    fn problem(&self, status: u16, key: MessageKey) -> ProblemDetail {
        ProblemDetail::for_status_and_detail(status, self.catalog.message(&self.locale, key))
            .with_instance(self.instance.clone())
    }
}
