//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating payloads that satisfy (or
//! deliberately break) the validation rules, plus `fake`-backed helpers for
//! realistic one-off data.

use fake::faker::address::en::{CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;

use domain_customer::{AddressRequest, CustomerRequest};

/// Strategy for phone numbers matching `+<1-3 digits><space?><1-15 digits>`
pub fn valid_phone_strategy() -> impl Strategy<Value = String> {
    ("[1-9][0-9]{0,2}", "[0-9]{1,15}", any::<bool>()).prop_map(|(code, number, spaced)| {
        if spaced {
            format!("+{code} {number}")
        } else {
            format!("+{code}{number}")
        }
    })
}

/// Strategy for phone numbers that never match the pattern
pub fn invalid_phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{6,12}",
        "\\+[0-9]{1,3}-[0-9]{6,9}",
        "\\+[0-9]{1,3}  [0-9]{6,9}",
        "\\+[0-9]{4} [0-9]{6,9}",
    ]
}

/// Strategy for syntactically valid email addresses
pub fn valid_email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{2,10}", "[a-z]{3,10}", prop_oneof!["com", "pe", "org"])
        .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}"))
}

/// Strategy for non-empty alphabetic names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,15}"
}

/// Strategy for valid address payloads
pub fn valid_address_strategy() -> impl Strategy<Value = AddressRequest> {
    (
        "[A-Z][a-z]{2,12} [0-9]{1,4}",
        name_strategy(),
        name_strategy(),
        "[0-9]{5}",
        name_strategy(),
    )
        .prop_map(|(street, city, state, zip_code, country)| AddressRequest {
            street: Some(street),
            city: Some(city),
            state: Some(state),
            zip_code: Some(zip_code),
            country: Some(country),
        })
}

/// Strategy for payloads that pass validation
pub fn valid_request_strategy() -> impl Strategy<Value = CustomerRequest> {
    (
        name_strategy(),
        name_strategy(),
        valid_email_strategy(),
        valid_phone_strategy(),
        valid_address_strategy(),
    )
        .prop_map(|(first_name, last_name, email, phone_number, address)| CustomerRequest {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            phone_number: Some(phone_number),
            address: Some(address),
        })
}

/// Generates a realistic, valid payload with fake data
pub fn fake_request() -> CustomerRequest {
    let digits: u64 = (100_000_000..999_999_999).fake();
    CustomerRequest {
        first_name: Some(FirstName().fake()),
        last_name: Some(LastName().fake()),
        email: Some(SafeEmail().fake()),
        phone_number: Some(format!("+51 {digits}")),
        address: Some(AddressRequest {
            street: Some(StreetName().fake()),
            city: Some(CityName().fake()),
            state: Some(StateName().fake()),
            zip_code: Some(ZipCode().fake()),
            country: Some(CountryName().fake()),
        }),
    }
}
