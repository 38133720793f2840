//! Custom Test Assertions
//!
//! Provides assertion helpers for customer responses and problem results
//! that give more meaningful failure messages than bare `assert_eq!`.

use serde_json::Value;

use domain_customer::{CustomerRequest, CustomerResponse};

/// Asserts that a response echoes every field of the request
///
/// # Panics
///
/// Panics naming the first field that differs
pub fn assert_response_matches_request(response: &CustomerResponse, request: &CustomerRequest) {
    let field = |value: &Option<String>| value.clone().unwrap_or_default();
    let address = request.address.clone().unwrap_or_default();

    let pairs = [
        ("firstName", &response.first_name, field(&request.first_name)),
        ("lastName", &response.last_name, field(&request.last_name)),
        ("email", &response.email, field(&request.email)),
        ("phoneNumber", &response.phone_number, field(&request.phone_number)),
        ("address.street", &response.address.street, field(&address.street)),
        ("address.city", &response.address.city, field(&address.city)),
        ("address.state", &response.address.state, field(&address.state)),
        ("address.zipCode", &response.address.zip_code, field(&address.zip_code)),
        ("address.country", &response.address.country, field(&address.country)),
    ];

    for (name, actual, expected) in pairs {
        assert_eq!(actual, &expected, "Field {name} differs from the request");
    }
}

/// Asserts that a JSON body is a problem result with the given status
pub fn assert_problem(body: &Value, status: u16) {
    assert_eq!(
        body["status"].as_u64(),
        Some(u64::from(status)),
        "Expected problem with status {status}, got {body}"
    );
    assert!(body["title"].is_string(), "Problem has no title: {body}");
}

/// Asserts that a problem body reports a violation for `field`
///
/// # Returns
///
/// The violation message
pub fn assert_violation<'a>(body: &'a Value, field: &str) -> &'a str {
    assert_problem(body, 400);
    body["validations"][field]
        .as_str()
        .unwrap_or_else(|| panic!("No violation for {field} in {body}"))
}
