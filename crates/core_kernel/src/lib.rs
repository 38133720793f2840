//! Core Kernel - Foundational types for the customer service
//!
//! This crate provides the building blocks shared by every other crate:
//! - Opaque, store-assigned identifiers
//! - Port infrastructure for the ports and adapters architecture
//! - The auditing collaborator used by persistence adapters

pub mod identifiers;
pub mod ports;
pub mod audit;
pub mod error;

pub use identifiers::CustomerId;
pub use ports::{
    PortError, DomainPort, OperationMetadata,
    HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use audit::{AuditMetadata, AuditorAware, MetadataAuditor};
pub use error::CoreError;
