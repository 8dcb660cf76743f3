//! `/customers` handlers. Each one records a request counter, delegates to the
//! customer service and lets `JsonApiError` pick the status on failure.

use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::info;

use service::customer::domain::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};

use crate::{errors::JsonApiError, observability, state::ServerState};

#[utoipa::path(
    get, path = "/api/v1/customers", tag = "customers",
    responses(
        (status = 200, description = "All customers", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    observability::record_request("list");
    let customers = state.customers.get_all_customers().await?;
    info!(count = customers.len(), "list customers");
    Ok(Json(customers))
}

#[utoipa::path(
    get, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Customer>, JsonApiError> {
    observability::record_request("get");
    Ok(Json(state.customers.get_customer(id).await?))
}

#[utoipa::path(
    post, path = "/api/v1/customers", tag = "customers",
    request_body = crate::openapi::CustomerRegistrationDoc,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<CustomerRegistrationRequest>,
) -> Result<StatusCode, JsonApiError> {
    observability::record_request("register");
    let created = state.customers.add_customer(input).await?;
    info!(id = created.id, "registered customer");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    put, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "No data changes found"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<CustomerUpdateRequest>,
) -> Result<StatusCode, JsonApiError> {
    observability::record_request("update");
    state.customers.update_customer(id, input).await?;
    info!(id, "updated customer");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    observability::record_request("delete");
    state.customers.delete_customer_by_id(id).await?;
    info!(id, "deleted customer");
    Ok(StatusCode::OK)
}
