//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use core_kernel::CustomerId;
use domain_customer::{AddressRequest, Customer, CustomerMapper, CustomerRequest};

use crate::fixtures::CustomerFixtures;

/// Builder for customer request payloads
///
/// Starts from the valid Nelson Patrick payload.
#[derive(Debug, Clone)]
pub struct CustomerRequestBuilder {
    request: CustomerRequest,
}

impl Default for CustomerRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            request: CustomerFixtures::nelson_patrick_request(),
        }
    }

    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.request.first_name = Some(value.into());
        self
    }

    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.request.last_name = Some(value.into());
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.request.email = Some(value.into());
        self
    }

    pub fn with_phone_number(mut self, value: impl Into<String>) -> Self {
        self.request.phone_number = Some(value.into());
        self
    }

    /// Sets the city, keeping the other address fields
    pub fn with_city(mut self, value: impl Into<String>) -> Self {
        self.address_mut().city = Some(value.into());
        self
    }

    /// Sets the zip code, keeping the other address fields
    pub fn with_zip_code(mut self, value: impl Into<String>) -> Self {
        self.address_mut().zip_code = Some(value.into());
        self
    }

    /// Removes the whole address object
    pub fn without_address(mut self) -> Self {
        self.request.address = None;
        self
    }

    /// Removes the email field
    pub fn without_email(mut self) -> Self {
        self.request.email = None;
        self
    }

    fn address_mut(&mut self) -> &mut AddressRequest {
        self.request.address.get_or_insert_with(AddressRequest::default)
    }

    /// Builds the request
    pub fn build(self) -> CustomerRequest {
        self.request
    }

    /// Builds the request as a JSON body
    pub fn build_json(self) -> serde_json::Value {
        serde_json::to_value(self.request).expect("request serializes")
    }
}

/// Builder for stored customer records
#[derive(Debug, Clone)]
pub struct CustomerBuilder {
    customer_id: Option<CustomerId>,
    request: CustomerRequest,
}

impl Default for CustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerBuilder {
    /// Creates a new transient customer builder
    pub fn new() -> Self {
        Self {
            customer_id: None,
            request: CustomerFixtures::nelson_patrick_request(),
        }
    }

    /// Sets the identifier, as if the record had been stored
    pub fn with_id(mut self, id: impl Into<CustomerId>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    /// Uses the given payload for the profile
    pub fn from_request(mut self, request: CustomerRequest) -> Self {
        self.request = request;
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        let mut customer = CustomerMapper::to_entity(&self.request);
        customer.customer_id = self.customer_id;
        customer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_overrides() {
        let request = CustomerRequestBuilder::new()
            .with_email("npatrick_gmail.com")
            .with_city("Cusco")
            .build();

        assert_eq!(request.email.as_deref(), Some("npatrick_gmail.com"));
        assert_eq!(request.address.unwrap().city.as_deref(), Some("Cusco"));
    }

    #[test]
    fn test_request_builder_json_shape() {
        let json = CustomerRequestBuilder::new().without_address().build_json();
        assert_eq!(json["firstName"], "Nelson");
        assert!(json["address"].is_null());
    }

    #[test]
    fn test_customer_builder() {
        let customer = CustomerBuilder::new().with_id("abc").build();
        assert_eq!(customer.customer_id, Some(CustomerId::new("abc")));
        assert_eq!(customer.profile.first_name, "Nelson");
    }
}
