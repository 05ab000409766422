pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod router;
pub mod services;

pub use config::Config;
pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Config,
    pub jwt_service: auth::jwt::JwtService,
    pub user_service: services::UserService,
    pub address_service: services::AddressService,
    pub product_service: services::ProductService,
    pub cart_service: services::CartService,
    pub order_service: services::OrderService,
    pub storage_service: services::StorageService,
    pub google_oauth: services::GoogleOAuthService,
    pub health_checker: services::HealthChecker,
}
