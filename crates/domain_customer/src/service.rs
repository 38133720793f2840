//! Customer lifecycle service
//!
//! The only place with business rules. Validation runs before any store
//! access, store absence becomes `CustomerError::NotFound`, and store
//! failures bubble up through `From<PortError>` untouched.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use core_kernel::{CustomerId, OperationMetadata};

use crate::error::CustomerError;
use crate::mapper::CustomerMapper;
use crate::payload::{CustomerRequest, CustomerResponse};
use crate::ports::CustomerPort;
use crate::validation::CustomerValidator;

/// Application service for customer use cases
#[derive(Clone)]
pub struct CustomerService {
    port: Arc<dyn CustomerPort>,
}

impl CustomerService {
    /// Creates a service over the given store gateway
    pub fn new(port: Arc<dyn CustomerPort>) -> Self {
        Self { port }
    }

    /// Returns every customer; an empty store yields an empty list
    #[instrument(skip(self, metadata), fields(correlation_id = correlation_id(&metadata)))]
    pub async fn find_all(
        &self,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<CustomerResponse>, CustomerError> {
        let customers = self.port.find_all(metadata).await?;
        debug!(count = customers.len(), "Customers found");
        Ok(customers.iter().map(CustomerMapper::to_response).collect())
    }

    /// Returns one customer
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` if no customer has the id
    #[instrument(skip(self, metadata), fields(customer_id = %customer_id, correlation_id = correlation_id(&metadata)))]
    pub async fn find_by_id(
        &self,
        customer_id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<CustomerResponse, CustomerError> {
        let customer = self
            .port
            .find_by_id(customer_id, metadata)
            .await?
            .ok_or_else(|| CustomerError::not_found(customer_id))?;
        debug!("Customer found");
        Ok(CustomerMapper::to_response(&customer))
    }

    /// Validates and stores a new customer
    ///
    /// Email uniqueness is left to the store; a duplicate surfaces as
    /// `CustomerError::Conflict`.
    #[instrument(skip(self, request, metadata), fields(correlation_id = correlation_id(&metadata)))]
    pub async fn create(
        &self,
        request: &CustomerRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<CustomerResponse, CustomerError> {
        CustomerValidator::validate(request).into_result()?;

        let customer = CustomerMapper::to_entity(request);
        let saved = self.port.save(customer, metadata).await?;
        info!(customer_id = ?saved.customer_id, "Customer created");
        Ok(CustomerMapper::to_response(&saved))
    }

    /// Overwrites the profile of an existing customer
    ///
    /// # Errors
    ///
    /// - `CustomerError::Validation` if the payload is invalid, whether or
    ///   not the id exists
    /// - `CustomerError::NotFound` if no customer has the id; nothing is saved
    #[instrument(skip(self, request, metadata), fields(customer_id = %customer_id, correlation_id = correlation_id(&metadata)))]
    pub async fn update(
        &self,
        customer_id: &CustomerId,
        request: &CustomerRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<CustomerResponse, CustomerError> {
        CustomerValidator::validate(request).into_result()?;

        let mut customer = self
            .port
            .find_by_id(customer_id, metadata.clone())
            .await?
            .ok_or_else(|| CustomerError::not_found(customer_id))?;

        CustomerMapper::merge(request, &mut customer);
        let updated = self.port.save(customer, metadata).await?;
        info!("Customer updated");
        Ok(CustomerMapper::to_response(&updated))
    }

    /// Deletes an existing customer
    ///
    /// The record is looked up first and deleted by its own stored id.
    #[instrument(skip(self, metadata), fields(customer_id = %customer_id, correlation_id = correlation_id(&metadata)))]
    pub async fn delete(
        &self,
        customer_id: &CustomerId,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), CustomerError> {
        let customer = self
            .port
            .find_by_id(customer_id, metadata.clone())
            .await?
            .ok_or_else(|| CustomerError::not_found(customer_id))?;

        let stored_id = customer
            .customer_id
            .ok_or_else(|| CustomerError::unexpected("stored customer has no identifier"))?;

        self.port.delete_by_id(&stored_id, metadata).await?;
        info!("Customer deleted");
        Ok(())
    }
}

fn correlation_id(metadata: &Option<OperationMetadata>) -> Option<&str> {
    metadata.as_ref().and_then(|m| m.correlation_id.as_deref())
}
