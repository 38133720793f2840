//! Customer aggregate
//!
//! A customer is the only aggregate in this domain: identity and contact
//! fields plus exactly one embedded [`Address`]. The fields a client may
//! change are grouped in [`CustomerProfile`] so that merges copy an explicit,
//! closed set of fields.

use serde::{Deserialize, Serialize};

use core_kernel::{AuditMetadata, CustomerId};

use crate::address::Address;

/// The client-writable part of a customer record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub first_name: String,
    pub last_name: String,
    /// Unique across all customers; uniqueness is enforced by the store
    pub email: String,
    pub phone_number: String,
    pub address: Address,
}

/// The customer aggregate root
///
/// `customer_id` is `None` until the store saves the record for the first
/// time. `audit` is owned by the store's auditing collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: Option<CustomerId>,
    #[serde(flatten)]
    pub profile: CustomerProfile,
    pub audit: AuditMetadata,
}

impl Customer {
    /// Creates an unsaved customer from a profile
    pub fn new(profile: CustomerProfile) -> Self {
        Self {
            customer_id: None,
            profile,
            audit: AuditMetadata::default(),
        }
    }
}
