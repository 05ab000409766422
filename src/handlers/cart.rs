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
use crate::models::cart::{AddToCartRequest, CartItemView, CartView, UpdateCartItemRequest};

/// The caller's cart; created lazily on first read
#[utoipa::path(
    get,
    path = "/api/cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart with computed totals", body = CartView)
    ),
    tag = "cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<CartView>>> {
    let cart = state.cart_service.get_cart(user.user_id()).await?;
    Ok(Json(ApiResponse::success(cart)))
}

/// Add a product to the cart, merging with an existing line
#[utoipa::path(
    post,
    path = "/api/cart",
    security(("bearer_auth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 201, description = "Item added to cart", body = CartItemView),
        (status = 400, description = "Product unavailable, own product or insufficient stock"),
        (status = 404, description = "Product not found")
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CartItemView>>)> {
    validate_payload(&request)?;
    info!(user_id = %user.user_id(), product_id = %request.product_id, "Adding to cart");

    let item = state.cart_service.add_item(user.user_id(), request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            item,
            "Item added to cart successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/cart/{item_id}",
    security(("bearer_auth" = [])),
    params(("item_id" = Uuid, Path, description = "Cart item id")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Cart item updated", body = CartItemView),
        (status = 400, description = "Insufficient stock or product unavailable"),
        (status = 403, description = "Cart item belongs to another user"),
        (status = 404, description = "Cart item not found")
    ),
    tag = "cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Json<ApiResponse<CartItemView>>> {
    validate_payload(&request)?;

    let item = state
        .cart_service
        .update_item(user.user_id(), item_id, request.quantity)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        item,
        "Cart item updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{item_id}",
    security(("bearer_auth" = [])),
    params(("item_id" = Uuid, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item removed from cart"),
        (status = 403, description = "Cart item belongs to another user"),
        (status = 404, description = "Cart item not found")
    ),
    tag = "cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.cart_service.remove_item(user.user_id(), item_id).await?;
    Ok(Json(ApiResponse::message_only(
        "Item removed from cart successfully",
    )))
}

/// Remove every line from the caller's cart
#[utoipa::path(
    delete,
    path = "/api/cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart cleared"),
        (status = 404, description = "Cart not found")
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<()>>> {
    state.cart_service.clear(user.user_id()).await?;
    Ok(Json(ApiResponse::message_only("Cart cleared successfully")))
}
