use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::user::{UpdateProfileRequest, UserProfile};

/// Profile reads and updates for the authenticated user.
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_me(&self, user_id: Uuid) -> Result<UserProfile> {
        let user = sqlx::query_as::<_, UserProfile>(
            "SELECT id, name, email, phone, avatar, role, created_at
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile> {
        // Changing email to one held by another account is a conflict
        if let Some(email) = &request.email {
            let taken = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM users WHERE email = $1 AND id <> $2",
            )
            .bind(email)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

            if taken.is_some() {
                return Err(ApiError::Conflict(
                    "Email is already taken by another user".to_string(),
                ));
            }
        }

        let updated = sqlx::query_as::<_, UserProfile>(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                avatar = COALESCE($5, avatar),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id, name, email, phone, avatar, role, created_at",
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.avatar)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

        info!(user_id = %user_id, "Profile updated");
        Ok(updated)
    }
}
