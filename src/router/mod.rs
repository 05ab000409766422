//! Route tree assembly: public endpoints, bearer-protected endpoints and the
//! admin-only subtree, each behind the shared middleware stack.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;
use crate::auth::middleware::{auth_middleware, require_admin_role};
use crate::handlers::{addresses, auth, cart, health, orders, products, storage, users};
use crate::middleware;
use crate::openapi;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        // Authentication
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/google/signin", get(auth::google_signin))
        .route("/api/auth/google/callback", get(auth::google_callback))
        // Public catalog
        .route("/api/products", get(products::list_products))
        .route("/api/products/by-user/{user_id}", get(products::products_by_user))
        .route("/api/products/{id}", get(products::get_product))
        // Image passthrough
        .route("/s3/images/{file_name}", get(storage::get_image))
        // Swagger UI
        .merge(
            SwaggerUi::new("/api/docs")
                .url("/api/docs/openapi.json", openapi::ApiDoc::openapi()),
        );

    let protected_routes = Router::new()
        // Profile
        .route("/api/user/me", get(users::get_me))
        .route("/api/user/profile", put(users::update_profile))
        // Address book
        .route("/api/address", get(addresses::list_addresses))
        .route("/api/address", post(addresses::create_address))
        .route("/api/address/{id}", get(addresses::get_address))
        .route("/api/address/{id}", put(addresses::update_address))
        .route("/api/address/{id}", delete(addresses::delete_address))
        // Seller catalog management
        .route("/api/products", post(products::create_product))
        .route("/api/products/my-products", get(products::my_products))
        .route("/api/products/{id}", put(products::update_product))
        .route("/api/products/{id}", delete(products::delete_product))
        // Cart
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart", post(cart::add_to_cart))
        .route("/api/cart", delete(cart::clear_cart))
        .route("/api/cart/{item_id}", put(cart::update_cart_item))
        .route("/api/cart/{item_id}", delete(cart::remove_from_cart))
        // Orders
        .route("/api/orders", post(orders::create_order))
        .route("/api/orders", get(orders::list_orders))
        .route("/api/orders/{id}", get(orders::get_order))
        .route("/api/orders/{id}/status", patch(orders::update_order_status))
        // Image upload
        .route("/s3/image", post(storage::upload_image))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    let admin_routes = Router::new()
        .route(
            "/api/admin/products/{id}/approve",
            post(products::approve_product),
        )
        .route(
            "/api/admin/products/{id}/unapprove",
            post(products::unapprove_product),
        )
        .layer(from_fn(require_admin_role))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    public_routes
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(middleware::add_security_headers))
                .layer(from_fn(middleware::request_logger_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(std::time::Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        // Uploads may carry up to 5 MiB of image data plus multipart framing
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}
