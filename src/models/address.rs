use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub county: Option<String>,
    pub pincode: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    #[validate(length(min = 1, max = 200, message = "Street is required"))]
    pub street: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,

    pub county: Option<String>,

    #[validate(length(min = 3, max = 12, message = "Pincode must be 3-12 characters"))]
    pub pincode: String,

    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    pub country: String,

    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    #[validate(length(min = 1, max = 200, message = "Street must not be empty"))]
    pub street: Option<String>,

    #[validate(length(min = 1, max = 100, message = "City must not be empty"))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 100, message = "State must not be empty"))]
    pub state: Option<String>,

    pub county: Option<String>,

    #[validate(length(min = 3, max = 12, message = "Pincode must be 3-12 characters"))]
    pub pincode: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Country must not be empty"))]
    pub country: Option<String>,

    pub is_default: Option<bool>,
}
