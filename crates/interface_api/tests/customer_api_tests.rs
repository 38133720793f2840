//! HTTP-level tests for the customer API over the in-memory store

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use core_kernel::PortError;
use domain_customer::ports::mock::MockCustomerPort;
use domain_customer::{CustomerPort, CustomerResponse};
use interface_api::auth::{create_token, permissions};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{
    assert_problem, assert_response_matches_request, assert_violation, CustomerFixtures,
    CustomerRequestBuilder, IdFixtures,
};

const SECRET: &str = "api-test-secret";

struct Harness {
    server: TestServer,
    port: Arc<MockCustomerPort>,
}

async fn harness() -> Harness {
    let port = Arc::new(
        MockCustomerPort::with_customers(vec![CustomerFixtures::peter_larson()])
            .await
            .unwrap(),
    );
    let config = ApiConfig {
        jwt_secret: SECRET.to_string(),
        ..Default::default()
    };
    let state = AppState::new(port.clone(), config).unwrap();
    let server = TestServer::new(create_router(state)).unwrap();
    Harness { server, port }
}

fn token(roles: &[&str]) -> String {
    create_token(
        "00u1tester",
        roles.iter().map(|r| r.to_string()).collect(),
        SECRET,
        300,
    )
    .unwrap()
}

fn authorized(request: TestRequest, roles: &[&str]) -> TestRequest {
    request
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token(roles))).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-api-version"),
            HeaderValue::from_static("v1"),
        )
}

fn writer() -> [&'static str; 2] {
    [permissions::CUSTOMER_READ, permissions::CUSTOMER_WRITE]
}

fn content_type(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_list_customers() {
    let h = harness().await;

    let response = authorized(h.server.get("/api/customers"), &[permissions::CUSTOMER_READ]).await;

    response.assert_status(StatusCode::OK);
    let customers: Vec<CustomerResponse> = response.json();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].customer_id, Some(IdFixtures::peter_larson_id()));
}

#[tokio::test]
async fn test_get_customer_by_id() {
    let h = harness().await;
    let path = format!("/api/customers/{}", IdFixtures::peter_larson_id());

    let response = authorized(h.server.get(&path), &["customer_read"]).await;

    response.assert_status(StatusCode::OK);
    let customer: CustomerResponse = response.json();
    assert_response_matches_request(&customer, &CustomerFixtures::peter_larson_request());
}

#[tokio::test]
async fn test_get_missing_customer_is_localised_404() {
    let h = harness().await;
    let missing = IdFixtures::missing_id();
    let path = format!("/api/customers/{missing}");

    let response = authorized(h.server.get(&path), &[permissions::CUSTOMER_READ])
        .add_header(header::ACCEPT_LANGUAGE, HeaderValue::from_static("es"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(content_type(&response), "application/problem+json");
    let body: Value = response.json();
    assert_problem(&body, 404);
    assert_eq!(
        body["detail"],
        format!("Cliente con id de cliente {missing} no encontrado")
    );
    assert_eq!(body["instance"], path);
}

#[tokio::test]
async fn test_create_customer_records_caller_as_auditor() {
    let h = harness().await;
    let request = CustomerFixtures::nelson_patrick_request();

    let response = authorized(h.server.post("/api/customers"), &writer())
        .json(&request)
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: CustomerResponse = response.json();
    assert_response_matches_request(&created, &request);

    let id = created.customer_id.expect("store assigns an id");
    let stored = h.port.find_by_id(&id, None).await.unwrap().unwrap();
    assert_eq!(stored.audit.created_by.as_deref(), Some("00u1tester"));
    assert_eq!(h.port.len().await, 2);
}

#[tokio::test]
async fn test_create_invalid_customer_reports_violations() {
    let h = harness().await;
    let body = CustomerRequestBuilder::new()
        .with_email("not-an-email")
        .with_phone_number("962329330")
        .without_address()
        .build_json();

    let response = authorized(h.server.post("/api/customers"), &writer())
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let problem: Value = response.json();
    assert_eq!(assert_violation(&problem, "email"), "Email format is not valid");
    assert!(assert_violation(&problem, "phoneNumber").starts_with("Phone number format is not valid"));
    assert_eq!(assert_violation(&problem, "address.city"), "City is required");
    assert_eq!(h.port.save_calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_400_problem() {
    let h = harness().await;

    let response = authorized(h.server.post("/api/customers"), &writer())
        .content_type("application/json")
        .bytes("{\"firstName\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_problem(&body, 400);
    assert_eq!(body["detail"], "Failed to read request body");
    assert!(body.get("validations").is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let h = harness().await;
    let body = CustomerRequestBuilder::new()
        .with_email("plarson@gmail.com")
        .build_json();

    let response = authorized(h.server.post("/api/customers"), &writer())
        .json(&body)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_problem(&response.json::<Value>(), 409);
}

#[tokio::test]
async fn test_update_customer() {
    let h = harness().await;
    let id = IdFixtures::peter_larson_id();
    let request = CustomerRequestBuilder::new()
        .with_first_name("Pedro")
        .with_email("plarson@gmail.com")
        .with_city("Arequipa")
        .build();

    let response = authorized(h.server.put(&format!("/api/customers/{id}")), &writer())
        .json(&request)
        .await;

    response.assert_status(StatusCode::OK);
    let updated: CustomerResponse = response.json();
    assert_eq!(updated.customer_id, Some(id.clone()));
    assert_response_matches_request(&updated, &request);

    let stored = h.port.find_by_id(&id, None).await.unwrap().unwrap();
    assert_eq!(stored.profile.first_name, "Pedro");
    assert_eq!(stored.audit.modified_by.as_deref(), Some("00u1tester"));
}

#[tokio::test]
async fn test_update_to_taken_email_is_conflict() {
    let h = harness().await;
    let created = authorized(h.server.post("/api/customers"), &writer())
        .json(&CustomerFixtures::nelson_patrick_request())
        .await;
    created.assert_status(StatusCode::CREATED);

    let id = IdFixtures::peter_larson_id();
    let path = format!("/api/customers/{id}");
    let request = CustomerRequestBuilder::new()
        .with_first_name("Peter")
        .with_email("npatrick@gmail.com")
        .build();

    let response = authorized(h.server.put(&path), &writer())
        .json(&request)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_problem(&body, 409);
    assert_eq!(body["instance"], path);

    let stored = h.port.find_by_id(&id, None).await.unwrap().unwrap();
    assert_eq!(stored.profile.email, "plarson@gmail.com");
}

#[tokio::test]
async fn test_update_missing_customer_is_404() {
    let h = harness().await;
    let path = format!("/api/customers/{}", IdFixtures::missing_id());

    let response = authorized(h.server.put(&path), &writer())
        .json(&CustomerFixtures::nelson_patrick_request())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(h.port.save_calls(), 0);
}

#[tokio::test]
async fn test_delete_customer() {
    let h = harness().await;
    let id = IdFixtures::peter_larson_id();

    let response = authorized(h.server.delete(&format!("/api/customers/{id}")), &writer()).await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(h.port.is_empty().await);
    assert_eq!(h.port.deleted_ids().await, vec![id]);
}

#[tokio::test]
async fn test_delete_missing_customer_is_404() {
    let h = harness().await;
    let path = format!("/api/customers/{}", IdFixtures::missing_id());

    let response = authorized(h.server.delete(&path), &writer()).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(h.port.deleted_ids().await.is_empty());
}

#[tokio::test]
async fn test_missing_token_is_401_problem() {
    let h = harness().await;

    let response = h
        .server
        .get("/api/customers")
        .add_header(
            HeaderName::from_static("x-api-version"),
            HeaderValue::from_static("v1"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(content_type(&response), "application/problem+json");
    let body: Value = response.json();
    assert_problem(&body, 401);
    assert_eq!(body["instance"], "/api/customers");
}

#[tokio::test]
async fn test_invalid_token_is_401() {
    let h = harness().await;

    let response = h
        .server
        .get("/api/customers")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reader_cannot_write() {
    let h = harness().await;

    let response = authorized(h.server.post("/api/customers"), &[permissions::CUSTOMER_READ])
        .json(&CustomerFixtures::nelson_patrick_request())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_problem(&body, 403);
    assert_eq!(body["detail"], "Access Denied");
    assert_eq!(body["instance"], "/api/customers");
    assert_eq!(h.port.save_calls(), 0);
}

#[tokio::test]
async fn test_admin_can_delete() {
    let h = harness().await;
    let id = IdFixtures::peter_larson_id();

    let response = authorized(h.server.delete(&format!("/api/customers/{id}")), &["admin"]).await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unknown_api_version_is_404() {
    let h = harness().await;

    let response = h
        .server
        .get("/api/customers")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token(&writer()))).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-api-version"),
            HeaderValue::from_static("v2"),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_problem(&body, 404);
    assert_eq!(body["instance"], "/api/customers");
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let h = harness().await;
    h.port
        .fail_next(PortError::internal("connection reset by peer at 10.0.0.7"))
        .await;

    let response = authorized(h.server.get("/api/customers"), &[permissions::CUSTOMER_READ]).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_problem(&body, 500);
    assert!(!body["detail"].as_str().unwrap().contains("10.0.0.7"));
}

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let h = harness().await;

    h.server.get("/health").await.assert_status(StatusCode::OK);

    let ready = h.server.get("/health/ready").await;
    ready.assert_status(StatusCode::OK);
    assert_eq!(ready.json::<Value>()["status"], json!("ready"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let h = harness().await;

    let response = authorized(h.server.get("/api/customers"), &[permissions::CUSTOMER_READ]).await;

    assert!(response.headers().contains_key("x-request-id"));
}
