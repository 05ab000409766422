use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::schema::types::OrderStatus;
use crate::error::{ApiError, ErrorCode, Result};
use crate::handlers::extractors::PaginationParams;
use crate::models::PaginationInfo;
use crate::models::order::{CreateOrderRequest, Order, OrderDetails, OrderItemRow, OrderItemView};
use crate::models::user::UserSummary;

const ORDER_COLUMNS: &str =
    "id, buyer_id, total, status, shipping_info, delivered_at, created_at, updated_at";

const ITEM_SELECT: &str = "SELECT oi.id, oi.order_id, oi.product_id, oi.product_name, oi.price, \
     oi.quantity, oi.subtotal, \
     p.title AS product_title, p.thumbnail AS product_thumbnail, \
     u.id AS seller_id, u.name AS seller_name, u.email AS seller_email, u.avatar AS seller_avatar \
     FROM order_items oi \
     JOIN products p ON p.id = oi.product_id \
     JOIN users u ON u.id = p.seller_id";

#[derive(Debug, sqlx::FromRow)]
struct PurchasableProduct {
    id: Uuid,
    title: String,
    price: Decimal,
    stock: i32,
    is_active: bool,
    is_approved: bool,
}

/// Order placement and lifecycle.
///
/// Placement validates every line against the live product, then applies the
/// order row, its item snapshots and the stock decrements in one database
/// transaction. The decrement is guarded (`stock >= quantity`), so a
/// concurrent purchase that drains stock mid-flight rolls the whole order
/// back instead of overselling.
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_order(
        &self,
        buyer_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<OrderDetails> {
        // Validate all products and accumulate the total before opening the
        // transaction; item snapshots carry the price seen here.
        let mut total = Decimal::ZERO;
        let mut snapshots = Vec::with_capacity(request.items.len());

        for item in &request.items {
            let product = sqlx::query_as::<_, PurchasableProduct>(
                "SELECT id, title, price, stock, is_active, is_approved
                 FROM products WHERE id = $1",
            )
            .bind(item.product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Product with ID {} not found", item.product_id))
            })?;

            if !product.is_active || !product.is_approved {
                return Err(ApiError::with_code(
                    ErrorCode::ProductUnavailable,
                    format!("Product {} is not available for purchase", product.title),
                ));
            }
            if product.stock < item.quantity {
                return Err(ApiError::insufficient_stock(
                    &product.title,
                    product.stock,
                    item.quantity,
                ));
            }

            let subtotal = product.price * Decimal::from(item.quantity);
            total += subtotal;
            snapshots.push((product, item.quantity, subtotal));
        }

        let order_id = Uuid::new_v4();
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, buyer_id, total, status, shipping_info)
             VALUES ($1, $2, $3, 'pending', $4)",
        )
        .bind(order_id)
        .bind(buyer_id)
        .bind(total)
        .bind(&request.shipping_info)
        .execute(&mut *tx)
        .await?;

        for (product, quantity, subtotal) in &snapshots {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, product_name, price, quantity, subtotal)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(product.id)
            .bind(&product.title)
            .bind(product.price)
            .bind(quantity)
            .bind(subtotal)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement: refuses to go below zero even if stock moved
            // since the validation read; a refusal aborts the whole order.
            let decremented = sqlx::query(
                "UPDATE products SET stock = stock - $1, updated_at = NOW()
                 WHERE id = $2 AND stock >= $1",
            )
            .bind(quantity)
            .bind(product.id)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                return Err(ApiError::insufficient_stock(
                    &product.title,
                    0,
                    *quantity,
                ));
            }
        }

        tx.commit().await?;

        info!(
            order_id = %order_id,
            buyer_id = %buyer_id,
            items = request.items.len(),
            %total,
            "Order created"
        );

        self.load_details(order_id).await
    }

    pub async fn get_order(&self, order_id: Uuid, user_id: Uuid) -> Result<OrderDetails> {
        let owned = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM orders WHERE id = $1 AND buyer_id = $2",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        if owned.is_none() {
            return Err(ApiError::not_found("Order"));
        }

        self.load_details(order_id).await
    }

    pub async fn list_orders(
        &self,
        user_id: Uuid,
        status: Option<OrderStatus>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<OrderDetails>, PaginationInfo)> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE buyer_id = $1 AND ($2::order_status IS NULL OR status = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(status)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders
             WHERE buyer_id = $1 AND ($2::order_status IS NULL OR status = $2)",
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        let buyer = self.load_buyer(user_id).await?;
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.load_items(order.id).await?;
            details.push(OrderDetails {
                order,
                items,
                buyer: buyer.clone(),
            });
        }

        let info = PaginationInfo::new(pagination.page, pagination.limit(), total as u64);
        Ok((details, info))
    }

    pub async fn update_status(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        next: OrderStatus,
    ) -> Result<OrderDetails> {
        let current = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM orders WHERE id = $1 AND buyer_id = $2",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;

        if !current.can_transition_to(next) {
            return Err(ApiError::with_details(
                ErrorCode::InvalidStatusTransition,
                "Order status transition is not allowed",
                format!("Cannot transition from {} to {}", current, next),
            ));
        }

        let delivered_at = if next == OrderStatus::Delivered {
            Some(Utc::now())
        } else {
            None
        };

        sqlx::query(
            "UPDATE orders SET status = $2, delivered_at = COALESCE($3, delivered_at),
             updated_at = NOW() WHERE id = $1",
        )
        .bind(order_id)
        .bind(next)
        .bind(delivered_at)
        .execute(&self.db)
        .await?;

        info!(order_id = %order_id, from = %current, to = %next, "Order status updated");
        self.load_details(order_id).await
    }

    async fn load_details(&self, order_id: Uuid) -> Result<OrderDetails> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;

        let buyer = self.load_buyer(order.buyer_id).await?;
        let items = self.load_items(order_id).await?;

        Ok(OrderDetails {
            order,
            items,
            buyer,
        })
    }

    async fn load_buyer(&self, user_id: Uuid) -> Result<UserSummary> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, avatar FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))
    }

    async fn load_items(&self, order_id: Uuid) -> Result<Vec<OrderItemView>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "{ITEM_SELECT} WHERE oi.order_id = $1 ORDER BY oi.created_at"
        ))
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(OrderItemView::from).collect())
    }
}
