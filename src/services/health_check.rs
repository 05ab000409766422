use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct HealthChecker {
    db: PgPool,
}

impl HealthChecker {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn check(&self) -> HealthReport {
        let database = match sqlx::query("SELECT 1").execute(&self.db).await {
            Ok(_) => "healthy",
            Err(_) => "unhealthy",
        };

        HealthReport {
            status: if database == "healthy" {
                "ok"
            } else {
                "degraded"
            },
            database,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }
}
