//! Customer Domain Ports
//!
//! This module defines the gateway the customer domain needs from its
//! store. The store assigns identifiers, enforces email uniqueness, and
//! stamps audit fields; the gateway itself carries no business rules.
//!
//! # Architecture
//!
//! - **Postgres Adapter**: `infra_db::adapters::PostgresCustomerAdapter`
//! - **Mock Adapter**: in-memory store for tests, behind the `mock` feature
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_customer::ports::CustomerPort;
//! use std::sync::Arc;
//!
//! pub struct CustomerService {
//!     port: Arc<dyn CustomerPort>,
//! }
//!
//! impl CustomerService {
//!     pub async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, PortError> {
//!         self.port.find_by_id(id, None).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, HealthCheckable, OperationMetadata, PortError};

use crate::customer::Customer;

/// Gateway over the customer store
///
/// Failures are store-level: connectivity loss surfaces as a transient
/// `PortError`, a duplicate email as `PortError::Conflict`.
#[async_trait]
pub trait CustomerPort: DomainPort + HealthCheckable {
    /// Returns every stored customer
    async fn find_all(
        &self,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Customer>, PortError>;

    /// Retrieves a customer by id
    ///
    /// # Arguments
    ///
    /// * `id` - The customer identifier
    /// * `metadata` - Optional operation metadata for tracing/auditing
    ///
    /// # Returns
    ///
    /// `Some(customer)` if found, `None` otherwise
    async fn find_by_id(
        &self,
        id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<Customer>, PortError>;

    /// Inserts or updates a customer
    ///
    /// # Arguments
    ///
    /// * `customer` - The record to persist; a transient record is inserted
    /// * `metadata` - Operation metadata passed to the auditing collaborator
    ///
    /// # Returns
    ///
    /// The persisted record with its identifier and audit fields set
    async fn save(
        &self,
        customer: Customer,
        metadata: Option<OperationMetadata>,
    ) -> Result<Customer, PortError>;

    /// Deletes a customer by id
    ///
    /// Deleting an id that does not exist is not an error.
    async fn delete_by_id(
        &self,
        id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Mock implementation of CustomerPort for testing
///
/// This adapter stores customers in memory and is useful for unit testing
/// without database dependencies. It mirrors the store's behaviour: ids are
/// assigned on first save, emails are unique, and audit fields are stamped
/// through an [`AuditorAware`](core_kernel::AuditorAware).
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::{Mutex, RwLock};
    use chrono::Utc;

    use core_kernel::{AdapterHealth, AuditorAware, HealthCheckResult, MetadataAuditor};

    /// In-memory mock implementation of CustomerPort
    pub struct MockCustomerPort {
        customers: Arc<RwLock<BTreeMap<CustomerId, Customer>>>,
        auditor: Arc<dyn AuditorAware>,
        save_calls: AtomicUsize,
        deleted: Mutex<Vec<CustomerId>>,
        next_failure: Mutex<Option<PortError>>,
    }

    impl Default for MockCustomerPort {
        fn default() -> Self {
            Self::with_auditor(Arc::new(MetadataAuditor))
        }
    }

    impl MockCustomerPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mock port that resolves actors with the given auditor
        pub fn with_auditor(auditor: Arc<dyn AuditorAware>) -> Self {
            Self {
                customers: Arc::new(RwLock::new(BTreeMap::new())),
                auditor,
                save_calls: AtomicUsize::new(0),
                deleted: Mutex::new(Vec::new()),
                next_failure: Mutex::new(None),
            }
        }

        /// Pre-populates with customers for testing, saving each in order
        pub async fn with_customers(customers: Vec<Customer>) -> Result<Self, PortError> {
            let port = Self::new();
            for customer in customers {
                port.save(customer, None).await?;
            }
            port.save_calls.store(0, Ordering::SeqCst);
            Ok(port)
        }

        /// Makes the next gateway call fail with `error`
        pub async fn fail_next(&self, error: PortError) {
            *self.next_failure.lock().await = Some(error);
        }

        /// Number of `save` calls since construction
        pub fn save_calls(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        /// Ids passed to `delete_by_id`, in call order
        pub async fn deleted_ids(&self) -> Vec<CustomerId> {
            self.deleted.lock().await.clone()
        }

        /// Number of stored customers
        pub async fn len(&self) -> usize {
            self.customers.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.customers.read().await.is_empty()
        }

        async fn take_failure(&self) -> Result<(), PortError> {
            match self.next_failure.lock().await.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }
    }

    impl DomainPort for MockCustomerPort {}

    #[async_trait]
    impl HealthCheckable for MockCustomerPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-customer-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl CustomerPort for MockCustomerPort {
        async fn find_all(
            &self,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Customer>, PortError> {
            self.take_failure().await?;
            Ok(self.customers.read().await.values().cloned().collect())
        }

        async fn find_by_id(
            &self,
            id: &CustomerId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<Customer>, PortError> {
            self.take_failure().await?;
            Ok(self.customers.read().await.get(id).cloned())
        }

        async fn save(
            &self,
            mut customer: Customer,
            metadata: Option<OperationMetadata>,
        ) -> Result<Customer, PortError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            self.take_failure().await?;

            let mut customers = self.customers.write().await;
            let id = customer.customer_id.clone().unwrap_or_else(CustomerId::generate);

            let duplicate = customers
                .values()
                .any(|c| c.customer_id.as_ref() != Some(&id) && c.profile.email == customer.profile.email);
            if duplicate {
                return Err(PortError::conflict(format!(
                    "duplicate key: email '{}' already exists",
                    customer.profile.email
                )));
            }

            // Stored audit fields win over whatever the caller carries
            let mut audit = customers
                .get(&id)
                .map(|existing| existing.audit.clone())
                .unwrap_or_default();
            audit.stamp(self.auditor.current_auditor(metadata.as_ref()), Utc::now());

            customer.customer_id = Some(id.clone());
            customer.audit = audit;
            customers.insert(id, customer.clone());
            Ok(customer)
        }

        async fn delete_by_id(
            &self,
            id: &CustomerId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.take_failure().await?;
            self.deleted.lock().await.push(id.clone());
            self.customers.write().await.remove(id);
            Ok(())
        }
    }
}
