use axum::{Json, extract::State};
use tracing::info;

use crate::AppState;
use crate::auth::middleware::AuthenticatedUser;
use crate::error::Result;
use crate::handlers::response::ApiResponse;
use crate::handlers::validate_payload;
use crate::models::user::{UpdateProfileRequest, UserProfile};

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/user/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile fetched successfully", body = UserProfile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "user"
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserProfile>>> {
    let profile = state.user_service.get_me(user.user_id()).await?;
    Ok(Json(ApiResponse::success_with_message(
        profile,
        "Profile fetched successfully",
    )))
}

/// Partial profile update
#[utoipa::path(
    put,
    path = "/api/user/profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = UserProfile),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already taken by another user")
    ),
    tag = "user"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserProfile>>> {
    validate_payload(&request)?;
    info!(user_id = %user.user_id(), "Updating profile");

    let profile = state
        .user_service
        .update_profile(user.user_id(), request)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        profile,
        "Profile updated successfully",
    )))
}
