use crate::{
    abstract_trait::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::{CreateOrderRecord, FindAllOrders, UpdateOrderRequest, page_bounds},
    errors::RepositoryError,
    model::{Order, OrderItem},
};
use async_trait::async_trait;
use sqlx::types::Json;
use tracing::{error, info, warn};
use uuid::Uuid;

const ORDER_COLUMNS: &str = "id, user_id, total_amount, discount_amount, tax_amount, \
     final_amount, shipping_address, payment_method, payment_status, order_status, \
     tracking_number, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, vendor_id, quantity, price, total";

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        user_id: Option<Uuid>,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        info!("🔍 Fetching orders user={user_id:?} status={:?}", req.status);

        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let status = req.status.map(|s| s.as_str());

        const FILTER: &str =
            "($1::UUID IS NULL OR user_id = $1) AND ($2::TEXT IS NULL OR order_status = $2)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM orders WHERE {FILTER}"))
                .bind(user_id)
                .bind(status)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    error!("❌ Failed to count orders: {e:?}");
                    RepositoryError::from(e)
                })?;

        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE {FILTER} \
             ORDER BY created_at DESC, id LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders o WHERE EXISTS \
             (SELECT 1 FROM order_items i WHERE i.order_id = o.id AND i.vendor_id = $1) \
             ORDER BY created_at DESC, id"
        ))
        .bind(vendor_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders for vendor {vendor_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItem>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ANY($1)"
        ))
        .bind(order_ids)
        .fetch_all(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_all_items(&self) -> Result<Vec<OrderItem>, RepositoryError> {
        sqlx::query_as::<_, OrderItem>(&format!("SELECT {ITEM_COLUMNS} FROM order_items"))
            .fetch_all(&self.db)
            .await
            .map_err(RepositoryError::from)
    }
}

#[derive(Clone)]
pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecord,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        info!("🛒 Creating order for user {} ({} items)", req.user_id, req.items.len());

        let mut tx = self.db.begin().await?;

        for item in &req.items {
            let reserved = sqlx::query(
                "UPDATE products SET stock = stock - $1, sales = sales + $1, updated_at = now() \
                 WHERE id = $2 AND stock >= $1",
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .execute(&mut *tx)
            .await?;

            if reserved.rows_affected() == 0 {
                warn!("⚠️ Insufficient stock for product {}", item.product_id);
                return Err(RepositoryError::Conflict(format!(
                    "Insufficient stock for product {}",
                    item.product_id
                )));
            }
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (id, user_id, total_amount, discount_amount, tax_amount, \
             final_amount, shipping_address, payment_method, payment_status, order_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', 'pending') \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.user_id)
        .bind(req.total_amount)
        .bind(req.discount_amount)
        .bind(req.tax_amount)
        .bind(req.final_amount)
        .bind(Json(&req.shipping_address))
        .bind(req.payment_method.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to insert order: {e:?}");
            RepositoryError::from(e)
        })?;

        let mut items = Vec::with_capacity(req.items.len());
        for item in &req.items {
            let row = sqlx::query_as::<_, OrderItem>(&format!(
                "INSERT INTO order_items (id, order_id, product_id, vendor_id, quantity, price, total) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {ITEM_COLUMNS}"
            ))
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.vendor_id)
            .bind(item.quantity)
            .bind(item.price)
            .bind(item.total)
            .fetch_one(&mut *tx)
            .await?;
            items.push(row);
        }

        tx.commit().await?;

        info!("✅ Created order {} total={}", order.id, order.final_amount);
        Ok((order, items))
    }

    async fn update_order(
        &self,
        id: Uuid,
        req: &UpdateOrderRequest,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET order_status = COALESCE($2, order_status), \
             payment_status = COALESCE($3, payment_status), \
             tracking_number = COALESCE($4, tracking_number), updated_at = now() \
             WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(req.order_status.map(|s| s.as_str()))
        .bind(req.payment_status.map(|s| s.as_str()))
        .bind(req.tracking_number.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update order {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🔄 Updated order {id}");
        Ok(order)
    }
}
