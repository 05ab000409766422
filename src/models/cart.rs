use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserSummary;

/// Cart line joined with its product, flat as returned by SQL
#[derive(Debug, FromRow)]
pub struct CartItemRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub price: Decimal,
    pub thumbnail: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: Uuid,
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub thumbnail: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    pub seller: UserSummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub product: CartProduct,
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartItemRow> for CartItemView {
    fn from(row: CartItemRow) -> Self {
        let subtotal = row.price * Decimal::from(row.quantity);
        Self {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            subtotal,
            created_at: row.created_at,
            updated_at: row.updated_at,
            product: CartProduct {
                id: row.product_id,
                title: row.title,
                price: row.price,
                thumbnail: row.thumbnail,
                stock: row.stock,
                is_active: row.is_active,
                seller: UserSummary {
                    id: row.seller_id,
                    name: row.seller_name,
                    email: row.seller_email,
                    avatar: row.seller_avatar,
                },
            },
        }
    }
}

/// Subtotals and totals are computed on read, never persisted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Uuid,
    pub items: Vec<CartItemView>,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,

    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_computed_from_price_and_quantity() {
        let row = CartItemRow {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            title: "Desk lamp".to_string(),
            price: Decimal::new(1999, 2),
            thumbnail: None,
            stock: 10,
            is_active: true,
            seller_id: Uuid::new_v4(),
            seller_name: "carol".to_string(),
            seller_email: "carol@example.com".to_string(),
            seller_avatar: None,
        };

        let view = CartItemView::from(row);
        assert_eq!(view.subtotal, Decimal::new(5997, 2));
    }
}
