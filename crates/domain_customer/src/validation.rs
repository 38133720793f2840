//! Customer payload validation
//!
//! Rules are evaluated per field in a fixed order and the first failing
//! rule wins, so each field reports at most one violation.
//!
//! # Validation Rules
//!
//! - `firstName`, `lastName`: non-empty
//! - `email`: non-empty, then a syntactically valid address
//! - `phoneNumber`: non-empty, then `+<1-3 digits><optional space><1-15 digits>`
//! - `address.street`, `address.city`, `address.state`, `address.zipCode`,
//!   `address.country`: non-empty
//!
//! Validation is purely structural and never consults the store.

use std::collections::BTreeMap;

use validator::ValidateEmail;

use crate::error::CustomerError;
use crate::messages::MessageKey;
use crate::payload::{AddressRequest, CustomerRequest};

/// Result of payload validation
///
/// Maps wire field names (dotted for nested fields) to the message key of
/// the first rule that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub violations: BTreeMap<String, MessageKey>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Returns true if no rule failed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Records a violation unless the field already has one
    pub fn add_violation(&mut self, field: impl Into<String>, key: MessageKey) {
        self.violations.entry(field.into()).or_insert(key);
    }

    /// Returns the violation recorded for a field
    pub fn violation(&self, field: &str) -> Option<MessageKey> {
        self.violations.get(field).copied()
    }

    /// Converts into a `Result`, failing with `CustomerError::Validation`
    pub fn into_result(self) -> Result<(), CustomerError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CustomerError::Validation(self))
        }
    }
}

/// Validator for customer payloads
pub struct CustomerValidator;

impl CustomerValidator {
    /// Validates a create or update payload
    ///
    /// # Returns
    ///
    /// A `ValidationResult` with one entry per invalid field
    pub fn validate(request: &CustomerRequest) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::require(&mut result, "firstName", &request.first_name, MessageKey::FirstNameRequired);
        Self::require(&mut result, "lastName", &request.last_name, MessageKey::LastNameRequired);

        if Self::require(&mut result, "email", &request.email, MessageKey::EmailRequired) {
            if let Some(email) = &request.email {
                if !email.validate_email() {
                    result.add_violation("email", MessageKey::EmailInvalidFormat);
                }
            }
        }

        if Self::require(
            &mut result,
            "phoneNumber",
            &request.phone_number,
            MessageKey::PhoneNumberRequired,
        ) {
            if let Some(phone) = &request.phone_number {
                if !is_valid_phone_number(phone) {
                    result.add_violation("phoneNumber", MessageKey::PhoneNumberInvalidFormat);
                }
            }
        }

        // A missing address object reports each of its fields
        let empty = AddressRequest::default();
        let address = request.address.as_ref().unwrap_or(&empty);
        Self::require(&mut result, "address.street", &address.street, MessageKey::StreetRequired);
        Self::require(&mut result, "address.city", &address.city, MessageKey::CityRequired);
        Self::require(&mut result, "address.state", &address.state, MessageKey::StateRequired);
        Self::require(&mut result, "address.zipCode", &address.zip_code, MessageKey::ZipCodeRequired);
        Self::require(&mut result, "address.country", &address.country, MessageKey::CountryRequired);

        result
    }

    /// Records `key` if the value is missing or empty; returns true if present
    fn require(
        result: &mut ValidationResult,
        field: &str,
        value: &Option<String>,
        key: MessageKey,
    ) -> bool {
        match value {
            Some(v) if !v.is_empty() => true,
            _ => {
                result.add_violation(field, key);
                false
            }
        }
    }
}

/// Checks `^\+\d{1,3}\s?\d{1,15}$`
///
/// Without a separator the country code and subscriber number run together,
/// so any 2 to 18 digits after the `+` match.
pub fn is_valid_phone_number(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('+') else {
        return false;
    };

    match rest.find(|c: char| !c.is_ascii_digit()) {
        None => (2..=18).contains(&rest.len()),
        Some(pos) => {
            let (code, tail) = rest.split_at(pos);
            let mut chars = tail.chars();
            let separator = chars.next();
            let number = chars.as_str();

            (1..=3).contains(&code.len())
                && separator.is_some_and(is_pattern_whitespace)
                && (1..=15).contains(&number.len())
                && number.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

fn is_pattern_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}
