//! PostgreSQL customer adapter tests
//!
//! These tests start a PostgreSQL container and are ignored by default.
//! Run them with `cargo test -p infra_db -- --ignored` on a machine with Docker.

use core_kernel::{AdapterHealth, HealthCheckable, OperationMetadata, PortError};
use domain_customer::CustomerPort;
use infra_db::PostgresCustomerAdapter;
use test_utils::{create_isolated_test_database, CustomerBuilder, CustomerFixtures, IdFixtures};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_assigns_id_and_audit() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCustomerAdapter::new(db.pool().clone());

    let saved = adapter
        .save(CustomerBuilder::new().build(), Some(OperationMetadata::initiated_by("00u1okta")))
        .await
        .unwrap();

    let id = saved.customer_id.clone().unwrap();
    assert_eq!(saved.audit.created_by.as_deref(), Some("00u1okta"));
    assert_eq!(saved.audit.version, Some(0));
    assert_eq!(adapter.find_by_id(&id, None).await.unwrap(), Some(saved));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_keeps_creation_audit_and_bumps_version() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCustomerAdapter::new(db.pool().clone());

    let created = adapter
        .save(CustomerBuilder::new().build(), Some(OperationMetadata::initiated_by("alice")))
        .await
        .unwrap();

    let mut changed = created.clone();
    changed.profile.first_name = "Nelly".to_string();
    let updated = adapter
        .save(changed, Some(OperationMetadata::initiated_by("bob")))
        .await
        .unwrap();

    assert_eq!(updated.customer_id, created.customer_id);
    assert_eq!(updated.profile.first_name, "Nelly");
    assert_eq!(updated.audit.created_by.as_deref(), Some("alice"));
    assert_eq!(updated.audit.created_at, created.audit.created_at);
    assert_eq!(updated.audit.modified_by.as_deref(), Some("bob"));
    assert_eq!(updated.audit.version, Some(1));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_is_conflict() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCustomerAdapter::new(db.pool().clone());

    adapter.save(CustomerBuilder::new().build(), None).await.unwrap();
    let result = adapter.save(CustomerBuilder::new().build(), None).await;

    assert!(matches!(result, Err(PortError::Conflict { .. })));
    assert_eq!(adapter.repository().count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_and_delete() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCustomerAdapter::new(db.pool().clone());

    let first = adapter.save(CustomerBuilder::new().build(), None).await.unwrap();
    let second = adapter
        .save(
            CustomerBuilder::new()
                .from_request(CustomerFixtures::peter_larson_request())
                .build(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(adapter.find_all(None).await.unwrap(), vec![first.clone(), second.clone()]);

    adapter
        .delete_by_id(first.customer_id.as_ref().unwrap(), None)
        .await
        .unwrap();
    adapter.delete_by_id(&IdFixtures::missing_id(), None).await.unwrap();

    assert_eq!(adapter.find_all(None).await.unwrap(), vec![second]);
    assert_eq!(
        adapter.find_by_id(first.customer_id.as_ref().unwrap(), None).await.unwrap(),
        None
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let db = create_isolated_test_database().await.unwrap();
    let adapter = PostgresCustomerAdapter::new(db.pool().clone());

    let health = adapter.health_check().await;
    assert_eq!(health.status, AdapterHealth::Healthy);
    assert!(health.is_operational());
}
