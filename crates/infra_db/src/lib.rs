//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL customer store using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `CustomerRepository` owns the
//! SQL and row types, while `PostgresCustomerAdapter` implements the domain's
//! `CustomerPort` on top of it, stamps audit fields, and translates errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresCustomerAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/customers")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresCustomerAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::CustomerRepository;
pub use adapters::PostgresCustomerAdapter;
