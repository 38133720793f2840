//! Problem results
//!
//! Translates [`CustomerError`] into the RFC 7807 shape returned to callers.
//! The mapping is total: anything not classified becomes a 500 whose detail
//! is a generic message, with the cause logged instead of returned.

use std::collections::BTreeMap;

use fluent::FluentArgs;
use serde::{Deserialize, Serialize};
use tracing::error;
use unic_langid::LanguageIdentifier;

use crate::error::CustomerError;
use crate::messages::{MessageCatalog, MessageKey};
use crate::validation::ValidationResult;

/// Media type of serialized problem results
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 7807 problem result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Per-field violation messages, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validations: Option<BTreeMap<String, String>>,
}

impl ProblemDetail {
    /// Creates a problem for a status code with its standard title
    pub fn for_status(status: u16) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title_for(status).to_string(),
            status,
            detail: None,
            instance: None,
            validations: None,
        }
    }

    /// Creates a problem with a detail message
    pub fn for_status_and_detail(status: u16, detail: impl Into<String>) -> Self {
        Self::for_status(status).with_detail(detail)
    }

    /// Sets the human-readable explanation
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the request path the problem occurred on
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Translates a domain error into a localised problem
    pub fn from_error(
        error: &CustomerError,
        catalog: &MessageCatalog,
        locale: &LanguageIdentifier,
    ) -> Self {
        let status = error.status_code();
        match error {
            CustomerError::Validation(result) => Self::for_status(status)
                .with_detail(catalog.message(locale, MessageKey::ValidationFailed))
                .with_validations(result, catalog, locale),
            CustomerError::NotFound(customer_id) => Self::for_status_and_detail(
                status,
                catalog.customer_not_found(locale, customer_id.as_str()),
            ),
            CustomerError::Conflict(reason) => {
                let mut args = FluentArgs::new();
                args.set("reason", reason.clone());
                Self::for_status_and_detail(
                    status,
                    catalog.format(locale, MessageKey::Conflict, Some(&args)),
                )
            }
            CustomerError::PermissionDenied(_) => Self::for_status_and_detail(
                status,
                catalog.message(locale, MessageKey::PermissionDenied),
            ),
            CustomerError::Unexpected(cause) => {
                error!(cause = %cause, "Unexpected failure while handling customer request");
                Self::for_status_and_detail(status, catalog.message(locale, MessageKey::Unexpected))
            }
        }
    }

    fn with_validations(
        mut self,
        result: &ValidationResult,
        catalog: &MessageCatalog,
        locale: &LanguageIdentifier,
    ) -> Self {
        let validations = result
            .violations
            .iter()
            .map(|(field, key)| (field.clone(), catalog.message(locale, *key)))
            .collect();
        self.validations = Some(validations);
        self
    }
}

fn title_for(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        _ => "Internal Server Error",
    }
}
