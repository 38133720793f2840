//! PostgreSQL Customer Adapter
//!
//! This module provides the database adapter for the customer domain,
//! implementing the `CustomerPort` trait using PostgreSQL via the
//! `CustomerRepository`.
//!
//! # Overview
//!
//! The `PostgresCustomerAdapter` serves as the bridge between the domain
//! layer's port interface and the database layer. It:
//!
//! - Assigns identifiers to transient customers on save
//! - Resolves the current actor through an `AuditorAware` and stamps audit columns
//! - Converts between domain customers and row types
//! - Translates `DatabaseError` into `PortError`
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerAdapter;
//! use domain_customer::CustomerPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn CustomerPort> = Arc::new(PostgresCustomerAdapter::new(pool));
//! let customers = port.find_all(None).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, AuditMetadata, AuditorAware, CustomerId, DomainPort, HealthCheckResult,
    HealthCheckable, MetadataAuditor, OperationMetadata, PortError,
};
use domain_customer::{Address, Customer, CustomerPort, CustomerProfile};

use crate::repositories::customer::{AddressDocument, CustomerRepository, CustomerRow, NewCustomer};

const ADAPTER_ID: &str = "postgres-customer-adapter";

/// PostgreSQL-backed implementation of the CustomerPort trait
///
/// # Health Checking
///
/// Health checks run `SELECT 1` against the pool.
///
/// # Error Handling
///
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - connection failures -> `PortError::Connection`
/// - other errors -> `PortError::Internal`
#[derive(Clone)]
pub struct PostgresCustomerAdapter {
    repository: CustomerRepository,
    pool: PgPool,
    auditor: Arc<dyn AuditorAware>,
}

impl std::fmt::Debug for PostgresCustomerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresCustomerAdapter")
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl PostgresCustomerAdapter {
    /// Creates an adapter that takes the auditor from operation metadata
    pub fn new(pool: PgPool) -> Self {
        Self::with_auditor(pool, Arc::new(MetadataAuditor))
    }

    /// Creates an adapter with a custom auditing collaborator
    pub fn with_auditor(pool: PgPool, auditor: Arc<dyn AuditorAware>) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            pool,
            auditor,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &CustomerRepository {
        &self.repository
    }
}

impl DomainPort for PostgresCustomerAdapter {}

#[async_trait]
impl HealthCheckable for PostgresCustomerAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl CustomerPort for PostgresCustomerAdapter {
    #[instrument(skip(self, _metadata))]
    async fn find_all(
        &self,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Customer>, PortError> {
        let rows = self.repository.find_all().await?;
        debug!(count = rows.len(), "Fetched customers");
        Ok(rows.into_iter().map(row_to_customer).collect())
    }

    #[instrument(skip(self, _metadata), fields(customer_id = %id))]
    async fn find_by_id(
        &self,
        id: &CustomerId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<Customer>, PortError> {
        let row = self.repository.find_by_id(id.as_str()).await?;
        Ok(row.map(row_to_customer))
    }

    #[instrument(skip(self, customer, metadata), fields(customer_id = ?customer.customer_id))]
    async fn save(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, PortError> {
        let customer_id = customer.customer_id.unwrap_or_else(CustomerId::generate);
        let actor = self.auditor.current_auditor(metadata.as_ref());
        let record = customer_to_record(&customer_id, customer.profile);

        let row = self
            .repository
            .upsert(&record, actor.as_deref(), Utc::now())
            .await?;
        debug!(version = row.version, "Saved customer");
        Ok(row_to_customer(row))
    }

    #[instrument(skip(self, _metadata), fields(customer_id = %id))]
    async fn delete_by_id(
        &self,
        id: &CustomerId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        let removed = self.repository.delete_by_id(id.as_str()).await?;
        debug!(removed, "Deleted customer");
        Ok(())
    }
}

// ============================================================================
// Conversion functions
// ============================================================================

fn customer_to_record(customer_id: &CustomerId, profile: CustomerProfile) -> NewCustomer {
    let address = profile.address;
    NewCustomer {
        customer_id: customer_id.to_string(),
        first_name: profile.first_name,
        last_name: profile.last_name,
        email: profile.email,
        phone_number: profile.phone_number,
        address: AddressDocument {
            street: address.street,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            country: address.country,
        },
    }
}

fn row_to_customer(row: CustomerRow) -> Customer {
    let address = row.address.0;
    Customer {
        customer_id: Some(CustomerId::new(row.customer_id)),
        profile: CustomerProfile {
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            address: Address {
                street: address.street,
                city: address.city,
                state: address.state,
                zip_code: address.zip_code,
                country: address.country,
            },
        },
        audit: AuditMetadata {
            created_by: row.created_by,
            created_at: Some(row.created_at),
            modified_by: row.modified_by,
            modified_at: Some(row.modified_at),
            version: Some(row.version),
        },
    }
}
