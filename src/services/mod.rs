pub mod address_service;
pub mod cart_service;
pub mod google_oauth;
pub mod health_check;
pub mod order_service;
pub mod product_service;
pub mod storage_service;
pub mod user_service;

pub use address_service::AddressService;
pub use cart_service::CartService;
pub use google_oauth::GoogleOAuthService;
pub use health_check::HealthChecker;
pub use order_service::OrderService;
pub use product_service::ProductService;
pub use storage_service::StorageService;
pub use user_service::UserService;
