use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::error::Result;
use crate::handlers::extractors::PaginationParams;
use crate::handlers::response::ApiResponse;
use crate::handlers::validate_payload;
use crate::models::order::{
    CreateOrderRequest, OrderDetails, OrderListQuery, OrderListResponse, UpdateOrderStatusRequest,
};

/// Place an order.
///
/// Order row, item snapshots and stock decrements commit atomically; any
/// failed stock guard rolls the whole order back.
#[utoipa::path(
    post,
    path = "/api/orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderDetails),
        (status = 400, description = "Unavailable product or insufficient stock"),
        (status = 404, description = "Referenced product not found")
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderDetails>>)> {
    validate_payload(&request)?;
    info!(
        user_id = %user.user_id(),
        items = request.items.len(),
        "Creating a new order"
    );

    let order = state
        .order_service
        .create_order(user.user_id(), request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            order,
            "Order created successfully",
        )),
    ))
}

/// The caller's orders, newest first
#[utoipa::path(
    get,
    path = "/api/orders",
    security(("bearer_auth" = [])),
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders retrieved successfully", body = OrderListResponse)
    ),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    let pagination = PaginationParams::new(query.page, query.limit);
    let (orders, pagination) = state
        .order_service
        .list_orders(user.user_id(), query.status, &pagination)
        .await?;

    Ok(Json(OrderListResponse { orders, pagination }))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order retrieved successfully", body = OrderDetails),
        (status = 404, description = "Order not found or not owned by caller")
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderDetails>>> {
    let order = state
        .order_service
        .get_order(order_id, user.user_id())
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        order,
        "Order retrieved successfully",
    )))
}

/// Transition the order through its fixed status allow-list
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated successfully", body = OrderDetails),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Order not found or not owned by caller")
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<OrderDetails>>> {
    info!(
        user_id = %user.user_id(),
        order_id = %order_id,
        status = %request.status,
        "Updating order status"
    );

    let order = state
        .order_service
        .update_status(order_id, user.user_id(), request.status)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        order,
        "Order status updated successfully",
    )))
}
