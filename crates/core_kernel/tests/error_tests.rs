//! Tests for core_kernel error types

use std::error::Error;

use core_kernel::error::CoreError;
use core_kernel::{CustomerId, PortError};

#[test]
fn test_blank_id_is_validation_error() {
    let error = "  ".parse::<CustomerId>().unwrap_err();

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Customer id cannot be blank"),
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::configuration("missing API_JWT_SECRET");
    assert_eq!(
        error.to_string(),
        "Configuration error: missing API_JWT_SECRET"
    );
}

#[test]
fn test_port_error_messages() {
    assert_eq!(
        PortError::conflict("duplicate email").to_string(),
        "Conflict: duplicate email"
    );
    assert_eq!(
        PortError::connection("pool closed").to_string(),
        "Connection error: pool closed"
    );
    assert!(PortError::internal("boom").source().is_none());
}

#[test]
fn test_internal_from_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = PortError::internal_from(io);

    assert!(error.source().is_some());
    assert_eq!(error.to_string(), "Internal error: refused");
}
