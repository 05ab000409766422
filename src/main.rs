use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use marketplace_api::auth::jwt::JwtService;
use marketplace_api::{AppState, Config, database, router, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration for environment: {}",
        config.environment
    );

    // Setup database connection and run migrations
    let db_pool = database::setup_database(&config.database_url, config.max_connections).await?;
    database::run_migrations(&db_pool).await?;

    // Initialize authentication service
    let jwt_service = JwtService::new(&config.jwt_secret);
    info!("Authentication service initialized");

    // Initialize object storage client
    let storage_service = services::StorageService::new(&config.storage).await;

    // Initialize OAuth client (routes report an error when unconfigured)
    let google_oauth = services::GoogleOAuthService::new(config.google.clone());
    if !google_oauth.is_configured() {
        tracing::warn!("Google OAuth is not configured; /api/auth/google routes will be disabled");
    }

    // Initialize domain services
    let user_service = services::UserService::new(db_pool.clone());
    let address_service = services::AddressService::new(db_pool.clone());
    let product_service = services::ProductService::new(db_pool.clone());
    let cart_service = services::CartService::new(db_pool.clone());
    let order_service = services::OrderService::new(db_pool.clone());
    let health_checker = services::HealthChecker::new(db_pool.clone());
    info!("Domain services initialized");

    // Create application state
    let app_state = AppState {
        db: db_pool,
        config: config.clone(),
        jwt_service,
        user_service,
        address_service,
        product_service,
        cart_service,
        order_service,
        storage_service,
        google_oauth,
        health_checker,
    };

    let app = router::build_router(app_state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting marketplace API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGTERM or SIGINT signal for graceful shutdown
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
