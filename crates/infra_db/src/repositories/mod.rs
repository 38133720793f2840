//! Repository implementations
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! plain row types. Queries are built at runtime so the crate compiles
//! without a live database.

pub mod customer;

pub use customer::{AddressDocument, CustomerRepository, CustomerRow, NewCustomer};
