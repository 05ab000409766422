use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::database::schema::types::OrderStatus;
use crate::models::user::UserSummary;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub status: OrderStatus,
    /// Opaque JSON string supplied by the client at checkout
    pub shipping_info: String,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order item joined with the live product and its seller, flat from SQL.
///
/// `product_name`/`price`/`subtotal` are the snapshot taken at purchase
/// time; the joined product columns reflect the listing as it is now.
#[derive(Debug, FromRow)]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    pub product_title: String,
    pub product_thumbnail: Option<String>,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_email: String,
    pub seller_avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Snapshot taken when the order was placed
    pub product_name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
    pub product: OrderItemProduct,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemProduct {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: Option<String>,
    pub seller: UserSummary,
}

impl From<OrderItemRow> for OrderItemView {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            price: row.price,
            quantity: row.quantity,
            subtotal: row.subtotal,
            product: OrderItemProduct {
                id: row.product_id,
                title: row.product_title,
                thumbnail: row.product_thumbnail,
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

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemView>,
    pub buyer: UserSummary,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,

    #[validate(length(min = 1, message = "Shipping info is required"))]
    pub shipping_info: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Optional status filter for the order listing
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderListResponse {
    pub orders: Vec<OrderDetails>,
    pub pagination: crate::models::PaginationInfo,
}
