use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ErrorCode, Result};
use crate::models::cart::{AddToCartRequest, CartItemRow, CartItemView, CartView};

const ITEM_SELECT: &str = "SELECT ci.id, ci.product_id, ci.quantity, ci.created_at, ci.updated_at, \
     p.title, p.price, p.thumbnail, p.stock, p.is_active, \
     u.id AS seller_id, u.name AS seller_name, u.email AS seller_email, u.avatar AS seller_avatar \
     FROM cart_items ci \
     JOIN products p ON p.id = ci.product_id \
     JOIN users u ON u.id = p.seller_id";

#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductGate {
    title: String,
    stock: i32,
    is_active: bool,
    seller_id: Uuid,
}

/// One cart per user, created lazily. Quantity ceilings are re-checked
/// against live stock on every mutation; the check is read-then-write, so
/// concurrent mutations can still oversell (stock is only decremented at
/// order time, behind a guarded update).
#[derive(Clone)]
pub struct CartService {
    db: PgPool,
}

impl CartService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn get_or_create_cart(&self, user_id: Uuid) -> Result<CartRow> {
        let existing = sqlx::query_as::<_, CartRow>(
            "SELECT id, created_at, updated_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        if let Some(cart) = existing {
            return Ok(cart);
        }

        let cart = sqlx::query_as::<_, CartRow>(
            "INSERT INTO carts (id, user_id) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET updated_at = carts.updated_at
             RETURNING id, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(cart)
    }

    pub async fn get_cart(&self, user_id: Uuid) -> Result<CartView> {
        let cart = self.get_or_create_cart(user_id).await?;

        let rows = sqlx::query_as::<_, CartItemRow>(&format!(
            "{ITEM_SELECT} WHERE ci.cart_id = $1 ORDER BY ci.created_at"
        ))
        .bind(cart.id)
        .fetch_all(&self.db)
        .await?;

        let items: Vec<CartItemView> = rows.into_iter().map(CartItemView::from).collect();
        let total = items.iter().map(|item| item.subtotal).sum();
        let count = items.iter().map(|item| item.quantity as i64).sum();

        Ok(CartView {
            id: cart.id,
            items,
            total,
            count,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        })
    }

    pub async fn add_item(&self, user_id: Uuid, request: AddToCartRequest) -> Result<CartItemView> {
        let product = sqlx::query_as::<_, ProductGate>(
            "SELECT title, stock, is_active, seller_id FROM products WHERE id = $1",
        )
        .bind(request.product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;

        if !product.is_active {
            return Err(ApiError::with_code(
                ErrorCode::ProductUnavailable,
                "Product is not available",
            ));
        }
        if product.seller_id == user_id {
            return Err(ApiError::with_code(
                ErrorCode::OwnProductInCart,
                "You cannot add your own products to cart",
            ));
        }
        if product.stock < request.quantity {
            return Err(ApiError::insufficient_stock(
                &product.title,
                product.stock,
                request.quantity,
            ));
        }

        let cart = self.get_or_create_cart(user_id).await?;

        let existing = sqlx::query_as::<_, (Uuid, i32)>(
            "SELECT id, quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart.id)
        .bind(request.product_id)
        .fetch_optional(&self.db)
        .await?;

        let item_id = match existing {
            Some((item_id, quantity)) => {
                // Merging an existing line re-checks the combined quantity
                let merged = quantity + request.quantity;
                if merged > product.stock {
                    return Err(ApiError::insufficient_stock(
                        &product.title,
                        product.stock,
                        merged,
                    ));
                }

                sqlx::query("UPDATE cart_items SET quantity = $2, updated_at = NOW() WHERE id = $1")
                    .bind(item_id)
                    .bind(merged)
                    .execute(&self.db)
                    .await?;
                item_id
            }
            None => {
                let item_id = Uuid::new_v4();
                sqlx::query(
                    "INSERT INTO cart_items (id, cart_id, product_id, quantity)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(item_id)
                .bind(cart.id)
                .bind(request.product_id)
                .bind(request.quantity)
                .execute(&self.db)
                .await?;
                item_id
            }
        };

        info!(user_id = %user_id, product_id = %request.product_id, "Cart item added");
        self.get_item(item_id).await
    }

    pub async fn update_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartItemView> {
        let row = sqlx::query_as::<_, (Uuid, i32, bool)>(
            "SELECT c.user_id, p.stock, p.is_active
             FROM cart_items ci
             JOIN carts c ON c.id = ci.cart_id
             JOIN products p ON p.id = ci.product_id
             WHERE ci.id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Cart item"))?;

        let (owner_id, stock, is_active) = row;

        if owner_id != user_id {
            return Err(ApiError::Forbidden(
                "You can only update your own cart items".to_string(),
            ));
        }
        if !is_active {
            return Err(ApiError::with_code(
                ErrorCode::ProductUnavailable,
                "Product is no longer available",
            ));
        }
        if quantity > stock {
            return Err(ApiError::insufficient_stock("item", stock, quantity));
        }

        sqlx::query("UPDATE cart_items SET quantity = $2, updated_at = NOW() WHERE id = $1")
            .bind(item_id)
            .bind(quantity)
            .execute(&self.db)
            .await?;

        self.get_item(item_id).await
    }

    pub async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<()> {
        let owner = sqlx::query_scalar::<_, Uuid>(
            "SELECT c.user_id FROM cart_items ci JOIN carts c ON c.id = ci.cart_id
             WHERE ci.id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Cart item"))?;

        if owner != user_id {
            return Err(ApiError::Forbidden(
                "You can only remove your own cart items".to_string(),
            ));
        }

        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    pub async fn clear(&self, user_id: Uuid) -> Result<()> {
        let cart_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Cart"))?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&self.db)
            .await?;

        info!(user_id = %user_id, "Cart cleared");
        Ok(())
    }

    async fn get_item(&self, item_id: Uuid) -> Result<CartItemView> {
        let row =
            sqlx::query_as::<_, CartItemRow>(&format!("{ITEM_SELECT} WHERE ci.id = $1"))
                .bind(item_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| ApiError::not_found("Cart item"))?;

        Ok(CartItemView::from(row))
    }
}
