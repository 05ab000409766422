use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::error::Result;
use crate::handlers::response::ApiResponse;
use crate::handlers::validate_payload;
use crate::models::address::{Address, CreateAddressRequest, UpdateAddressRequest};

/// All addresses of the caller, default first
#[utoipa::path(
    get,
    path = "/api/address",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Addresses fetched successfully", body = Vec<Address>)
    ),
    tag = "address"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Address>>>> {
    let addresses = state.address_service.list(user.user_id()).await?;
    Ok(Json(ApiResponse::success_with_message(
        addresses,
        "Addresses fetched successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/address/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address fetched successfully", body = Address),
        (status = 404, description = "Address not found or not owned by caller")
    ),
    tag = "address"
)]
pub async fn get_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(address_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Address>>> {
    let address = state
        .address_service
        .get(address_id, user.user_id())
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        address,
        "Address fetched successfully",
    )))
}

/// Create an address; making it the default unsets any previous default in
/// the same transaction.
#[utoipa::path(
    post,
    path = "/api/address",
    security(("bearer_auth" = [])),
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address created successfully", body = Address),
        (status = 400, description = "Validation failed")
    ),
    tag = "address"
)]
pub async fn create_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Address>>)> {
    validate_payload(&request)?;
    info!(user_id = %user.user_id(), "Creating new address");

    let address = state
        .address_service
        .create(user.user_id(), request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            address,
            "Address created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/address/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated successfully", body = Address),
        (status = 404, description = "Address not found or not owned by caller")
    ),
    tag = "address"
)]
pub async fn update_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(address_id): Path<Uuid>,
    Json(request): Json<UpdateAddressRequest>,
) -> Result<Json<ApiResponse<Address>>> {
    validate_payload(&request)?;

    let address = state
        .address_service
        .update(address_id, user.user_id(), request)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        address,
        "Address updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/address/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted successfully"),
        (status = 404, description = "Address not found or not owned by caller")
    ),
    tag = "address"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(address_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .address_service
        .delete(address_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::message_only(
        "Address deleted successfully",
    )))
}
