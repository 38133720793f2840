//! Customer Domain
//!
//! This crate holds the customer aggregate and every rule that applies to it:
//!
//! - **Validator**: field-level checks on incoming payloads
//! - **Mapper**: conversions between wire payloads, the stored record, and the
//!   outward response, including the merge used by updates
//! - **Gateway port**: the find/save/delete contract the store implements
//! - **Service**: the create/read/update/delete lifecycle
//! - **Problem translation**: mapping of domain failures to RFC 7807 results
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_customer::{CustomerService, CustomerRequest};
//! use domain_customer::ports::mock::MockCustomerPort;
//!
//! let service = CustomerService::new(Arc::new(MockCustomerPort::new()));
//! let created = service.create(&request, None).await?;
//! let found = service.find_by_id(created.customer_id.as_ref().unwrap(), None).await?;
//! assert_eq!(created, found);
//! ```

pub mod address;
pub mod customer;
pub mod payload;
pub mod validation;
pub mod mapper;
pub mod ports;
pub mod service;
pub mod error;
pub mod messages;
pub mod problem;

pub use address::Address;
pub use customer::{Customer, CustomerProfile};
pub use payload::{AddressRequest, AddressResponse, CustomerRequest, CustomerResponse};
pub use validation::{CustomerValidator, ValidationResult};
pub use mapper::CustomerMapper;
pub use ports::CustomerPort;
pub use service::CustomerService;
pub use error::CustomerError;
pub use messages::{MessageCatalog, MessageKey};
pub use problem::ProblemDetail;
