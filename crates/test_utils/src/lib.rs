//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! customer service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common customers
//! - `builders`: Builder patterns for request and record construction
//! - `database`: Database test helpers and container management
//! - `assertions`: Assertion helpers for responses and problem results
//! - `generators`: Property-based and fake data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
