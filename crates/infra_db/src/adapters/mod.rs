//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerAdapter;
//! use domain_customer::CustomerPort;
//!
//! let adapter = PostgresCustomerAdapter::new(pool);
//! let customer = adapter.find_by_id(&customer_id, None).await?;
//! ```

pub mod customer;

pub use customer::PostgresCustomerAdapter;
