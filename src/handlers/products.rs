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
use crate::models::product::{
    CreateProductRequest, ProductFilters, ProductListQuery, ProductListResponse, ProductListing,
    UpdateProductRequest,
};

/// Public catalog listing with filters and pagination.
///
/// Only approved products are visible; inactive listings are hidden unless
/// `isActive=false` is asked for explicitly.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Filtered product page", body = ProductListResponse)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let mut filters = ProductFilters::from_query(&query);
    filters.is_active = Some(query.is_active.unwrap_or(true));

    let pagination = PaginationParams::new(query.page, query.limit);
    let (products, pagination) = state.product_service.list(&filters, &pagination).await?;

    Ok(Json(ProductListResponse {
        products,
        pagination,
    }))
}

/// Listings owned by the caller, pending approval and inactive ones included
#[utoipa::path(
    get,
    path = "/api/products/my-products",
    security(("bearer_auth" = [])),
    params(ProductListQuery),
    responses(
        (status = 200, description = "Caller's product page", body = ProductListResponse)
    ),
    tag = "products"
)]
pub async fn my_products(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let mut filters = ProductFilters::from_query(&query);
    filters.seller_id = Some(user.user_id());
    filters.only_approved = false;

    let pagination = PaginationParams::new(query.page, query.limit);
    let (products, pagination) = state.product_service.list(&filters, &pagination).await?;

    Ok(Json(ProductListResponse {
        products,
        pagination,
    }))
}

/// Public listing of another seller's active products
#[utoipa::path(
    get,
    path = "/api/products/by-user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Seller id"), ProductListQuery),
    responses(
        (status = 200, description = "Seller's product page", body = ProductListResponse)
    ),
    tag = "products"
)]
pub async fn products_by_user(
    State(state): State<AppState>,
    Path(seller_id): Path<Uuid>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let mut filters = ProductFilters::from_query(&query);
    filters.seller_id = Some(seller_id);
    filters.is_active = Some(true);

    let pagination = PaginationParams::new(query.page, query.limit);
    let (products, pagination) = state.product_service.list(&filters, &pagination).await?;

    Ok(Json(ProductListResponse {
        products,
        pagination,
    }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ProductListing),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductListing>>> {
    let product = state.product_service.get_by_id(product_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        product,
        "Product retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ProductListing),
        (status = 400, description = "Validation failed")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductListing>>)> {
    validate_payload(&request)?;
    info!(seller_id = %user.user_id(), title = %request.title, "Creating product");

    let product = state
        .product_service
        .create(user.user_id(), request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            product,
            "Product created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductListing),
        (status = 404, description = "Product not found or not owned by caller")
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductListing>>> {
    validate_payload(&request)?;

    let product = state
        .product_service
        .update(product_id, user.user_id(), request)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        product,
        "Product updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 404, description = "Product not found or not owned by caller")
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .product_service
        .delete(product_id, user.user_id())
        .await?;

    Ok(Json(ApiResponse::message_only(
        "Product deleted successfully",
    )))
}

/// Admin: allow a product into the public catalog
#[utoipa::path(
    post,
    path = "/api/admin/products/{id}/approve",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product approved", body = ProductListing),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin"
)]
pub async fn approve_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductListing>>> {
    let product = state.product_service.set_approval(product_id, true).await?;
    Ok(Json(ApiResponse::success_with_message(
        product,
        "Product approved",
    )))
}

/// Admin: pull a product from the public catalog
#[utoipa::path(
    post,
    path = "/api/admin/products/{id}/unapprove",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product unapproved", body = ProductListing),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin"
)]
pub async fn unapprove_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductListing>>> {
    let product = state
        .product_service
        .set_approval(product_id, false)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        product,
        "Product unapproved",
    )))
}
