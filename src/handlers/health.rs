use axum::{Json, extract::State};

use crate::AppState;
use crate::services::health_check::HealthReport;

/// Liveness probe with a database ping
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health report", body = HealthReport)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health_checker.check().await)
}
