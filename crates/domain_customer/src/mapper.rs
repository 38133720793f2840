//! Conversions between wire payloads, the customer record, and responses

use crate::address::Address;
use crate::customer::{Customer, CustomerProfile};
use crate::payload::{AddressRequest, AddressResponse, CustomerRequest, CustomerResponse};

/// Maps customer payloads to and from the domain record
///
/// Requests are expected to have passed validation; absent fields map to
/// empty strings.
pub struct CustomerMapper;

impl CustomerMapper {
    /// Builds a new, unsaved customer from a request
    ///
    /// The identifier and audit fields stay at their zero value.
    pub fn to_entity(request: &CustomerRequest) -> Customer {
        Customer::new(Self::to_profile(request))
    }

    /// Builds the outward view of a customer; audit fields are never exposed
    pub fn to_response(customer: &Customer) -> CustomerResponse {
        let profile = &customer.profile;
        CustomerResponse {
            customer_id: customer.customer_id.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            address: AddressResponse {
                street: profile.address.street.clone(),
                city: profile.address.city.clone(),
                state: profile.address.state.clone(),
                zip_code: profile.address.zip_code.clone(),
                country: profile.address.country.clone(),
            },
        }
    }

    /// Overwrites every profile field of `customer` with the request's values
    ///
    /// The identifier and audit fields are left untouched.
    pub fn merge(request: &CustomerRequest, customer: &mut Customer) {
        customer.profile = Self::to_profile(request);
    }

    fn to_profile(request: &CustomerRequest) -> CustomerProfile {
        CustomerProfile {
            first_name: text(&request.first_name),
            last_name: text(&request.last_name),
            email: text(&request.email),
            phone_number: text(&request.phone_number),
            address: request
                .address
                .as_ref()
                .map(Self::to_address)
                .unwrap_or_default(),
        }
    }

    fn to_address(request: &AddressRequest) -> Address {
        Address {
            street: text(&request.street),
            city: text(&request.city),
            state: text(&request.state),
            zip_code: text(&request.zip_code),
            country: text(&request.country),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
