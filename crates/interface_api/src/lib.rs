//! HTTP API Layer
//!
//! This crate provides the REST API for the customer service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Customer CRUD and health endpoints
//! - **Middleware**: Authentication, API versioning, tracing, audit logging
//! - **Error Handling**: Localised `application/problem+json` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(Arc::new(PostgresCustomerAdapter::new(pool)), config)?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::CoreError;
use domain_customer::{CustomerPort, CustomerService, MessageCatalog};

use crate::config::ApiConfig;
use crate::handlers::{customer, health};
use crate::middleware::{api_version_middleware, audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerService,
    pub port: Arc<dyn CustomerPort>,
    pub catalog: Arc<MessageCatalog>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the service and message catalog around a customer store
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if the embedded messages fail to load
    pub fn new(port: Arc<dyn CustomerPort>, config: ApiConfig) -> Result<Self, CoreError> {
        Ok(Self {
            service: CustomerService::new(port.clone()),
            port,
            catalog: Arc::new(MessageCatalog::embedded()?),
            config,
        })
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route(
            "/",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/:id",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        );

    // Protected API routes
    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), api_version_middleware))
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
