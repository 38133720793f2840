//! Customer domain errors
//!
//! The taxonomy every operation reports through: validation failure, not
//! found, conflict, permission denied, and unexpected failure.

use thiserror::Error;

use core_kernel::{CustomerId, PortError};

use crate::validation::ValidationResult;

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// One or more payload fields failed validation
    #[error("Validation failed for {} field(s)", .0.violations.len())]
    Validation(ValidationResult),

    /// No customer exists with the given id
    #[error("Customer with customer id {0} not found")]
    NotFound(CustomerId),

    /// The store rejected the write because of a uniqueness or integrity constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not allowed to perform the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other failure
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl CustomerError {
    /// Creates a NotFound error
    pub fn not_found(customer_id: &CustomerId) -> Self {
        CustomerError::NotFound(customer_id.clone())
    }

    /// Creates an Unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        CustomerError::Unexpected(message.into())
    }

    /// Returns the HTTP status code the error translates to
    pub fn status_code(&self) -> u16 {
        match self {
            CustomerError::Validation(_) => 400,
            CustomerError::PermissionDenied(_) => 403,
            CustomerError::NotFound(_) => 404,
            CustomerError::Conflict(_) => 409,
            CustomerError::Unexpected(_) => 500,
        }
    }
}

impl From<PortError> for CustomerError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { id, .. } => CustomerError::NotFound(CustomerId::new(id)),
            PortError::Conflict { message } => CustomerError::Conflict(message),
            PortError::Unauthorized { message } => CustomerError::PermissionDenied(message),
            other => CustomerError::Unexpected(other.to_string()),
        }
    }
}
