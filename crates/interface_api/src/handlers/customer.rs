//! Customer handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::CustomerId;
use domain_customer::{CustomerRequest, CustomerResponse};

use crate::auth::permissions;
use crate::context::RequestContext;
use crate::{error::ApiError, AppState};

/// Lists every customer
pub async fn list_customers(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    ctx.require(permissions::CUSTOMER_READ)?;

    let customers = state
        .service
        .find_all(ctx.metadata())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(customers))
}

/// Gets a customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    ctx.require(permissions::CUSTOMER_READ)?;

    let customer = state
        .service
        .find_by_id(&CustomerId::new(id), ctx.metadata())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(customer))
}

/// Creates a customer
pub async fn create_customer(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    ctx.require(permissions::CUSTOMER_WRITE)?;
    let Json(request) = body.map_err(|rejection| ctx.errors.malformed_body(rejection))?;

    let customer = state
        .service
        .create(&request, ctx.metadata())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Replaces the profile of an existing customer
pub async fn update_customer(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<Json<CustomerResponse>, ApiError> {
    ctx.require(permissions::CUSTOMER_WRITE)?;
    let Json(request) = body.map_err(|rejection| ctx.errors.malformed_body(rejection))?;

    let customer = state
        .service
        .update(&CustomerId::new(id), &request, ctx.metadata())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(customer))
}

/// Deletes a customer
pub async fn delete_customer(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    ctx.require(permissions::CUSTOMER_WRITE)?;

    state
        .service
        .delete(&CustomerId::new(id), ctx.metadata())
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(StatusCode::NO_CONTENT)
}
