//! OpenAPI document served at /api/docs.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::google_signin,
        crate::handlers::auth::google_callback,
        crate::handlers::users::get_me,
        crate::handlers::users::update_profile,
        crate::handlers::addresses::list_addresses,
        crate::handlers::addresses::get_address,
        crate::handlers::addresses::create_address,
        crate::handlers::addresses::update_address,
        crate::handlers::addresses::delete_address,
        crate::handlers::products::list_products,
        crate::handlers::products::my_products,
        crate::handlers::products::products_by_user,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::approve_product,
        crate::handlers::products::unapprove_product,
        crate::handlers::cart::get_cart,
        crate::handlers::cart::add_to_cart,
        crate::handlers::cart::update_cart_item,
        crate::handlers::cart::remove_from_cart,
        crate::handlers::cart::clear_cart,
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::storage::upload_image,
        crate::handlers::storage::get_image,
    ),
    components(schemas(
        crate::database::schema::types::UserRole,
        crate::database::schema::types::OrderStatus,
        crate::models::PaginationInfo,
        crate::models::user::UserProfile,
        crate::models::user::UserSummary,
        crate::models::user::RegisterRequest,
        crate::models::user::LoginRequest,
        crate::models::user::AuthResponse,
        crate::models::user::AuthUser,
        crate::models::user::UpdateProfileRequest,
        crate::models::address::Address,
        crate::models::address::CreateAddressRequest,
        crate::models::address::UpdateAddressRequest,
        crate::models::product::Product,
        crate::models::product::ProductListing,
        crate::models::product::ProductListResponse,
        crate::models::product::CreateProductRequest,
        crate::models::product::UpdateProductRequest,
        crate::models::cart::CartView,
        crate::models::cart::CartItemView,
        crate::models::cart::CartProduct,
        crate::models::cart::AddToCartRequest,
        crate::models::cart::UpdateCartItemRequest,
        crate::models::order::Order,
        crate::models::order::OrderDetails,
        crate::models::order::OrderItemView,
        crate::models::order::OrderItemProduct,
        crate::models::order::OrderItemInput,
        crate::models::order::CreateOrderRequest,
        crate::models::order::UpdateOrderStatusRequest,
        crate::models::order::OrderListResponse,
        crate::handlers::storage::UploadedImage,
        crate::services::health_check::HealthReport,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and OAuth"),
        (name = "user", description = "Profile management"),
        (name = "address", description = "Address book"),
        (name = "products", description = "Product catalog"),
        (name = "cart", description = "Shopping cart"),
        (name = "orders", description = "Order placement and lifecycle"),
        (name = "storage", description = "Image upload and retrieval"),
        (name = "admin", description = "Admin-only operations"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Marketplace API",
        description = "REST API backend for a second-hand marketplace"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
