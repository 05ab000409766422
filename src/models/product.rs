use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserSummary;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    #[schema(value_type = f64, example = 129.99)]
    pub price: Decimal,
    pub quantity: i32,
    pub stock: i32,
    pub condition: String,
    pub year_of_manufacture: Option<i32>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub dimension_length: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub dimension_width: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub dimension_height: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Decimal>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub original_packaging: bool,
    pub manual_included: bool,
    pub working_condition_desc: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing/detail row: product joined with its seller and review aggregate.
///
/// Flat shape as it comes back from SQL; converted to [`ProductListing`]
/// before it reaches the wire.
#[derive(Debug, FromRow)]
pub struct ProductListRow {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub stock: i32,
    pub condition: String,
    pub year_of_manufacture: Option<i32>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub dimension_length: Option<Decimal>,
    pub dimension_width: Option<Decimal>,
    pub dimension_height: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub original_packaging: bool,
    pub manual_included: bool,
    pub working_condition_desc: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_avatar: Option<String>,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    #[serde(flatten)]
    pub product: Product,
    pub seller: UserSummary,
    pub average_rating: f64,
    pub review_count: i64,
}

impl From<ProductListRow> for ProductListing {
    fn from(row: ProductListRow) -> Self {
        Self {
            seller: UserSummary {
                id: row.seller_id,
                name: row.seller_name,
                email: row.seller_email,
                avatar: row.seller_avatar,
            },
            average_rating: row.average_rating,
            review_count: row.review_count,
            product: Product {
                id: row.id,
                seller_id: row.seller_id,
                title: row.title,
                category: row.category,
                description: row.description,
                price: row.price,
                quantity: row.quantity,
                stock: row.stock,
                condition: row.condition,
                year_of_manufacture: row.year_of_manufacture,
                brand: row.brand,
                model: row.model,
                dimension_length: row.dimension_length,
                dimension_width: row.dimension_width,
                dimension_height: row.dimension_height,
                weight: row.weight,
                material: row.material,
                color: row.color,
                original_packaging: row.original_packaging,
                manual_included: row.manual_included,
                working_condition_desc: row.working_condition_desc,
                thumbnail: row.thumbnail,
                images: row.images,
                is_active: row.is_active,
                is_approved: row.is_approved,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[schema(value_type = f64, example = 49.5)]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,

    #[validate(length(min = 1, max = 50, message = "Condition is required"))]
    pub condition: String,

    #[validate(range(min = 1800, max = 2100, message = "Year of manufacture is implausible"))]
    pub year_of_manufacture: Option<i32>,

    pub brand: Option<String>,
    pub model: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub dimension_length: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub dimension_width: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub dimension_height: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Decimal>,
    pub material: Option<String>,
    pub color: Option<String>,

    #[serde(default)]
    pub original_packaging: bool,
    #[serde(default)]
    pub manual_included: bool,

    pub working_condition_desc: Option<String>,
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description must not be empty"))]
    pub description: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,

    pub condition: Option<String>,
    pub year_of_manufacture: Option<i32>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub dimension_length: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub dimension_width: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub dimension_height: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Decimal>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub original_packaging: Option<bool>,
    pub manual_included: Option<bool>,
    pub working_condition_desc: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Option<Vec<String>>,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,

    pub is_active: Option<bool>,
}

/// Query string accepted by the listing endpoints
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    pub seller_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub condition: Option<String>,
    pub brand: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Filters as applied by the product service after endpoint-specific
/// overrides (forced seller, forced activation) are folded in.
#[derive(Debug, Default, Clone)]
pub struct ProductFilters {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub seller_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub condition: Option<String>,
    pub brand: Option<String>,
    /// Listing endpoints only surface approved products; the owner views skip
    /// the approval gate so sellers can see their pending items.
    pub only_approved: bool,
}

impl ProductFilters {
    pub fn from_query(query: &ProductListQuery) -> Self {
        Self {
            category: query.category.clone(),
            min_price: query.min_price,
            max_price: query.max_price,
            seller_id: query.seller_id,
            is_active: query.is_active,
            search: query.search.clone(),
            condition: query.condition.clone(),
            brand: query.brand.clone(),
            only_approved: true,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductListing>,
    pub pagination: crate::models::PaginationInfo,
}
