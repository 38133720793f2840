//! Pre-built Test Fixtures
//!
//! Provides ready-to-use customers for unit and integration tests. These
//! fixtures are consistent and predictable across the suite.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use core_kernel::{AuditMetadata, CustomerId};
use domain_customer::{
    Address, AddressRequest, Customer, CustomerProfile, CustomerRequest, MessageCatalog,
};

static CATALOG: Lazy<MessageCatalog> = Lazy::new(|| {
    MessageCatalog::embedded().expect("embedded message catalog must parse")
});

/// Returns a process-wide message catalog for tests
pub fn shared_catalog() -> &'static MessageCatalog {
    &CATALOG
}

/// Fixture for customer identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// Id of the stored Peter Larson fixture
    pub fn peter_larson_id() -> CustomerId {
        CustomerId::new("66aeee840271a2600f91d799")
    }

    /// An id no fixture uses
    pub fn missing_id() -> CustomerId {
        CustomerId::new("66aeee845291a2632f91d95a")
    }
}

/// Fixture for customer payloads and records
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// Valid creation payload for Nelson Patrick
    pub fn nelson_patrick_request() -> CustomerRequest {
        CustomerRequest {
            first_name: Some("Nelson".to_string()),
            last_name: Some("Patrick".to_string()),
            email: Some("npatrick@gmail.com".to_string()),
            phone_number: Some("+51 987654321".to_string()),
            address: Some(AddressRequest {
                street: Some("Av. La Marina 1520".to_string()),
                city: Some("Lima".to_string()),
                state: Some("Lima".to_string()),
                zip_code: Some("15088".to_string()),
                country: Some("Peru".to_string()),
            }),
        }
    }

    /// Valid payload for Peter Larson
    pub fn peter_larson_request() -> CustomerRequest {
        CustomerRequest {
            first_name: Some("Peter".to_string()),
            last_name: Some("Larson".to_string()),
            email: Some("plarson@gmail.com".to_string()),
            phone_number: Some("+51 962329330".to_string()),
            address: Some(AddressRequest {
                street: Some("Av. Javier Prado Este 2045".to_string()),
                city: Some("Lima".to_string()),
                state: Some("Lima".to_string()),
                zip_code: Some("15036".to_string()),
                country: Some("Peru".to_string()),
            }),
        }
    }

    /// Stored Peter Larson record, as the store would return it
    pub fn peter_larson() -> Customer {
        Customer {
            customer_id: Some(IdFixtures::peter_larson_id()),
            profile: CustomerProfile {
                first_name: "Peter".to_string(),
                last_name: "Larson".to_string(),
                email: "plarson@gmail.com".to_string(),
                phone_number: "+51 962329330".to_string(),
                address: Address::new(
                    "Av. Javier Prado Este 2045",
                    "Lima",
                    "Lima",
                    "15036",
                    "Peru",
                ),
            },
            audit: AuditMetadata {
                created_by: Some("admin".to_string()),
                created_at: Some(TemporalFixtures::created_at()),
                modified_by: Some("admin".to_string()),
                modified_at: Some(TemporalFixtures::created_at()),
                version: Some(0),
            },
        }
    }
}

/// Fixture for audit timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Creation time of stored fixtures (Aug 4, 2024)
    pub fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 4, 3, 0, 20).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_customer::CustomerValidator;

    #[test]
    fn test_request_fixtures_are_valid() {
        for request in [
            CustomerFixtures::nelson_patrick_request(),
            CustomerFixtures::peter_larson_request(),
        ] {
            let result = CustomerValidator::validate(&request);
            assert!(result.is_valid(), "Violations: {:?}", result.violations);
        }
    }

    #[test]
    fn test_ids_differ() {
        assert_ne!(IdFixtures::peter_larson_id(), IdFixtures::missing_id());
    }
}
