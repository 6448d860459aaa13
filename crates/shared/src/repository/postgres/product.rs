use crate::{
    abstract_trait::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::{
        CreateProductRecord, ProductListFilter, ProductSort, UpdateProductRequest,
    },
    errors::RepositoryError,
    model::{Product, ProductStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use super::like_pattern;

const PRODUCT_COLUMNS: &str = "p.id, p.vendor_id, p.name, p.description, p.price, p.discount, \
     p.category, p.images, p.stock, p.sku, p.status, p.rejection_reason, p.approved_at, \
     p.rating, p.review_count, p.sales, p.tags, p.created_at, p.updated_at";

const RETURNING_COLUMNS: &str = "id, vendor_id, name, description, price, discount, category, \
     images, stock, sku, status, rejection_reason, approved_at, rating, review_count, sales, \
     tags, created_at, updated_at";

const LIST_FILTER: &str = "($1::TEXT IS NULL OR p.status = $1) \
     AND (NOT $2::BOOLEAN OR v.status = 'approved') \
     AND ($3::TEXT IS NULL OR LOWER(p.category) = LOWER($3)) \
     AND (NOT $4::BOOLEAN OR p.discount > 0) \
     AND ($5::TEXT IS NULL OR p.name ILIKE $5 OR p.description ILIKE $5) \
     AND ($6::UUID IS NULL OR p.vendor_id = $6)";

fn order_clause(sort: ProductSort) -> &'static str {
    match sort {
        ProductSort::New => "p.created_at DESC, p.id",
        ProductSort::Popular => "p.sales DESC, p.created_at DESC, p.id",
        ProductSort::PriceLow => "p.price ASC, p.created_at DESC, p.id",
        ProductSort::PriceHigh => "p.price DESC, p.created_at DESC, p.id",
        ProductSort::Rating => "p.rating DESC, p.created_at DESC, p.id",
    }
}

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        filter: &ProductListFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        info!("🔍 Fetching products with filter: {filter:?}");

        let status = filter.status.map(|s| s.as_str());
        let category = filter.category.as_deref().filter(|c| !c.trim().is_empty());
        let pattern = like_pattern(filter.search.as_deref());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM products p JOIN vendors v ON v.id = p.vendor_id \
             WHERE {LIST_FILTER}"
        ))
        .bind(status)
        .bind(filter.only_approved_vendors)
        .bind(category)
        .bind(filter.on_sale)
        .bind(pattern.as_deref())
        .bind(filter.vendor_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count products: {e:?}");
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p JOIN vendors v ON v.id = p.vendor_id \
             WHERE {LIST_FILTER} ORDER BY {} LIMIT $7 OFFSET $8",
            order_clause(filter.sort)
        ))
        .bind(status)
        .bind(filter.only_approved_vendors)
        .bind(category)
        .bind(filter.on_sale)
        .bind(pattern.as_deref())
        .bind(filter.vendor_id)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok((products, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn count_by_vendor(&self, vendor_id: Uuid) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE vendor_id = $1")
            .bind(vendor_id)
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }
}

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRecord,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (id, vendor_id, name, description, price, discount, category, \
             images, stock, sku, tags, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'pending') \
             RETURNING {RETURNING_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.vendor_id)
        .bind(&req.name)
        .bind(req.description.as_deref())
        .bind(req.price)
        .bind(req.discount)
        .bind(&req.category)
        .bind(&req.images)
        .bind(req.stock)
        .bind(req.sku.as_deref())
        .bind(&req.tags)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create product {}: {e:?}", req.name);
            RepositoryError::from(e)
        })?;

        info!("✅ Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = COALESCE($2, name), \
             description = COALESCE($3, description), price = COALESCE($4, price), \
             discount = COALESCE($5, discount), category = COALESCE($6, category), \
             images = COALESCE($7, images), stock = COALESCE($8, stock), \
             sku = COALESCE($9, sku), tags = COALESCE($10, tags), updated_at = now() \
             WHERE id = $1 RETURNING {RETURNING_COLUMNS}"
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.description.as_deref())
        .bind(req.price)
        .bind(req.discount)
        .bind(req.category.as_deref())
        .bind(req.images.as_deref())
        .bind(req.stock)
        .bind(req.sku.as_deref())
        .bind(req.tags.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update product {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🔄 Updated product {id}");
        Ok(product)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ProductStatus,
        rejection_reason: Option<String>,
        approved_at: Option<DateTime<Utc>>,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET status = $2, rejection_reason = $3, approved_at = $4, \
             updated_at = now() WHERE id = $1 RETURNING {RETURNING_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(rejection_reason)
        .bind(approved_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to set status of product {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn update_rating(
        &self,
        id: Uuid,
        rating: f64,
        review_count: i32,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET rating = $2, review_count = $3, updated_at = now() \
             WHERE id = $1 RETURNING {RETURNING_COLUMNS}"
        ))
        .bind(id)
        .bind(rating)
        .bind(review_count)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product {id}");
        Ok(())
    }
}
