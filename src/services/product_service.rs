use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::handlers::extractors::PaginationParams;
use crate::models::PaginationInfo;
use crate::models::product::{
    CreateProductRequest, ProductFilters, ProductListRow, ProductListing, UpdateProductRequest,
};

/// Columns of the joined listing row; review aggregate folded in via GROUP BY.
const LISTING_SELECT: &str = "SELECT p.id, p.seller_id, p.title, p.category, p.description, \
     p.price, p.quantity, p.stock, p.condition, p.year_of_manufacture, p.brand, p.model, \
     p.dimension_length, p.dimension_width, p.dimension_height, p.weight, p.material, p.color, \
     p.original_packaging, p.manual_included, p.working_condition_desc, p.thumbnail, p.images, \
     p.is_active, p.is_approved, p.created_at, p.updated_at, \
     u.name AS seller_name, u.email AS seller_email, u.avatar AS seller_avatar, \
     COALESCE(AVG(r.rating)::FLOAT8, 0) AS average_rating, \
     COUNT(r.id) AS review_count \
     FROM products p \
     JOIN users u ON u.id = p.seller_id \
     LEFT JOIN reviews r ON r.product_id = p.id";

const LISTING_GROUP_BY: &str = " GROUP BY p.id, u.name, u.email, u.avatar";

#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        seller_id: Uuid,
        request: CreateProductRequest,
    ) -> Result<ProductListing> {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO products (
                id, seller_id, title, category, description, price, quantity, stock,
                condition, year_of_manufacture, brand, model,
                dimension_length, dimension_width, dimension_height, weight,
                material, color, original_packaging, manual_included,
                working_condition_desc, thumbnail, images, is_active
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8,
                $9, $10, $11, $12,
                $13, $14, $15, $16,
                $17, $18, $19, $20,
                $21, $22, $23, $24
            )",
        )
        .bind(id)
        .bind(seller_id)
        .bind(&request.title)
        .bind(&request.category)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.quantity)
        .bind(request.stock)
        .bind(&request.condition)
        .bind(request.year_of_manufacture)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.dimension_length)
        .bind(request.dimension_width)
        .bind(request.dimension_height)
        .bind(request.weight)
        .bind(&request.material)
        .bind(&request.color)
        .bind(request.original_packaging)
        .bind(request.manual_included)
        .bind(&request.working_condition_desc)
        .bind(&request.thumbnail)
        .bind(&request.images)
        .bind(request.is_active)
        .execute(&self.db)
        .await?;

        info!(product_id = %id, seller_id = %seller_id, "Product created");
        self.get_by_id(id).await
    }

    /// Joined detail lookup; no approval/activation gate, callers decide.
    pub async fn get_by_id(&self, product_id: Uuid) -> Result<ProductListing> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        qb.push(" WHERE p.id = ");
        qb.push_bind(product_id);
        qb.push(LISTING_GROUP_BY);

        let row: Option<ProductListRow> = qb.build_query_as().fetch_optional(&self.db).await?;

        row.map(ProductListing::from)
            .ok_or_else(|| ApiError::not_found("Product"))
    }

    pub async fn update(
        &self,
        product_id: Uuid,
        seller_id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<ProductListing> {
        let owned = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM products WHERE id = $1 AND seller_id = $2",
        )
        .bind(product_id)
        .bind(seller_id)
        .fetch_optional(&self.db)
        .await?;

        if owned.is_none() {
            return Err(ApiError::not_found("Product"));
        }

        sqlx::query(
            "UPDATE products SET
                title = COALESCE($3, title),
                category = COALESCE($4, category),
                description = COALESCE($5, description),
                price = COALESCE($6, price),
                quantity = COALESCE($7, quantity),
                condition = COALESCE($8, condition),
                year_of_manufacture = COALESCE($9, year_of_manufacture),
                brand = COALESCE($10, brand),
                model = COALESCE($11, model),
                dimension_length = COALESCE($12, dimension_length),
                dimension_width = COALESCE($13, dimension_width),
                dimension_height = COALESCE($14, dimension_height),
                weight = COALESCE($15, weight),
                material = COALESCE($16, material),
                color = COALESCE($17, color),
                original_packaging = COALESCE($18, original_packaging),
                manual_included = COALESCE($19, manual_included),
                working_condition_desc = COALESCE($20, working_condition_desc),
                thumbnail = COALESCE($21, thumbnail),
                images = COALESCE($22, images),
                stock = COALESCE($23, stock),
                is_active = COALESCE($24, is_active),
                updated_at = NOW()
             WHERE id = $1 AND seller_id = $2",
        )
        .bind(product_id)
        .bind(seller_id)
        .bind(&request.title)
        .bind(&request.category)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.quantity)
        .bind(&request.condition)
        .bind(request.year_of_manufacture)
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.dimension_length)
        .bind(request.dimension_width)
        .bind(request.dimension_height)
        .bind(request.weight)
        .bind(&request.material)
        .bind(&request.color)
        .bind(request.original_packaging)
        .bind(request.manual_included)
        .bind(&request.working_condition_desc)
        .bind(&request.thumbnail)
        .bind(&request.images)
        .bind(request.stock)
        .bind(request.is_active)
        .execute(&self.db)
        .await?;

        self.get_by_id(product_id).await
    }

    pub async fn delete(&self, product_id: Uuid, seller_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND seller_id = $2")
            .bind(product_id)
            .bind(seller_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Product"));
        }

        info!(product_id = %product_id, seller_id = %seller_id, "Product deleted");
        Ok(())
    }

    /// Admin toggle for the approval gate on listings and purchases
    pub async fn set_approval(&self, product_id: Uuid, approved: bool) -> Result<ProductListing> {
        let result = sqlx::query(
            "UPDATE products SET is_approved = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(product_id)
        .bind(approved)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Product"));
        }

        self.get_by_id(product_id).await
    }

    pub async fn list(
        &self,
        filters: &ProductFilters,
        pagination: &PaginationParams,
    ) -> Result<(Vec<ProductListing>, PaginationInfo)> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        push_filters(&mut qb, filters);
        qb.push(LISTING_GROUP_BY);
        qb.push(" ORDER BY p.created_at DESC LIMIT ");
        qb.push_bind(pagination.limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(pagination.offset() as i64);

        let rows: Vec<ProductListRow> = qb.build_query_as().fetch_all(&self.db).await?;

        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut count_qb, filters);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.db).await?;

        let products = rows.into_iter().map(ProductListing::from).collect();
        let info = PaginationInfo::new(pagination.page, pagination.limit(), total as u64);

        Ok((products, info))
    }
}

/// Appends the WHERE clause shared by the listing and its count query.
/// Filters only reference `products p`, so the count can skip the joins.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &ProductFilters) {
    qb.push(" WHERE 1 = 1");

    if filters.only_approved {
        qb.push(" AND p.is_approved = TRUE");
    }
    if let Some(active) = filters.is_active {
        qb.push(" AND p.is_active = ");
        qb.push_bind(active);
    }
    if let Some(category) = &filters.category {
        qb.push(" AND p.category = ");
        qb.push_bind(category.clone());
    }
    if let Some(seller_id) = filters.seller_id {
        qb.push(" AND p.seller_id = ");
        qb.push_bind(seller_id);
    }
    if let Some(condition) = &filters.condition {
        qb.push(" AND p.condition = ");
        qb.push_bind(condition.clone());
    }
    if let Some(brand) = &filters.brand {
        qb.push(" AND p.brand = ");
        qb.push_bind(brand.clone());
    }
    if let Some(min_price) = filters.min_price {
        qb.push(" AND p.price >= ");
        qb.push_bind(min_price);
    }
    if let Some(max_price) = filters.max_price {
        qb.push(" AND p.price <= ");
        qb.push_bind(max_price);
    }
    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (p.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR p.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_filter_sql_contains_price_bounds() {
        let filters = ProductFilters {
            min_price: Some(Decimal::new(1000, 2)),
            max_price: Some(Decimal::new(5000, 2)),
            only_approved: true,
            ..Default::default()
        };

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut qb, &filters);
        let sql = qb.sql();

        assert!(sql.contains("p.is_approved = TRUE"));
        assert!(sql.contains("p.price >= "));
        assert!(sql.contains("p.price <= "));
    }

    #[test]
    fn test_filter_sql_search_targets_title_and_description() {
        let filters = ProductFilters {
            search: Some("lamp".to_string()),
            ..Default::default()
        };

        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut qb, &filters);
        let sql = qb.sql();

        assert!(sql.contains("p.title ILIKE "));
        assert!(sql.contains("p.description ILIKE "));
        // Unfiltered listing keeps the approval gate off for owner views
        assert!(!sql.contains("is_approved"));
    }
}
