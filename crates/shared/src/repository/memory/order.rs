use crate::{
    abstract_trait::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::{CreateOrderRecord, FindAllOrders, UpdateOrderRequest, page_bounds},
    errors::RepositoryError,
    model::{Order, OrderItem, OrderStatus, PaymentStatus},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::collections::HashMap;
use uuid::Uuid;

use super::{MemoryDatabase, newest_first, page};

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryDatabase {
    async fn find_all(
        &self,
        user_id: Option<Uuid>,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let tables = self.tables.read().await;

        let matched = newest_first(
            tables
                .orders
                .iter()
                .filter(|o| user_id.is_none_or(|id| o.user_id == id))
                .filter(|o| req.status.is_none_or(|s| o.order_status == s))
                .cloned(),
            |o| o.created_at,
        );

        let total = matched.len() as i64;
        Ok((page(matched, limit, offset), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .orders
                .iter()
                .filter(|o| {
                    tables
                        .order_items
                        .iter()
                        .any(|i| i.order_id == o.id && i.vendor_id == vendor_id)
                })
                .cloned(),
            |o| o.created_at,
        ))
    }

    async fn find_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .order_items
            .iter()
            .filter(|i| order_ids.contains(&i.order_id))
            .cloned()
            .collect())
    }

    async fn find_all_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.orders.iter().cloned(), |o| o.created_at))
    }

    async fn find_all_items(&self) -> Result<Vec<OrderItem>, RepositoryError> {
        Ok(self.tables.read().await.order_items.clone())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryDatabase {
    async fn create_order(
        &self,
        req: &CreateOrderRecord,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let mut tables = self.tables.write().await;

        let mut wanted: HashMap<Uuid, i32> = HashMap::new();
        for item in &req.items {
            *wanted.entry(item.product_id).or_default() += item.quantity;
        }

        // Check everything before touching any row so a short item leaves stock as it was.
        for (product_id, quantity) in &wanted {
            let in_stock = tables
                .products
                .iter()
                .find(|p| p.id == *product_id)
                .map(|p| p.stock)
                .unwrap_or(0);

            if in_stock < *quantity {
                return Err(RepositoryError::Conflict(format!(
                    "Insufficient stock for product {product_id}"
                )));
            }
        }

        let now = Utc::now();
        for product in tables.products.iter_mut() {
            if let Some(quantity) = wanted.get(&product.id) {
                product.stock -= quantity;
                product.sales += quantity;
                product.updated_at = now;
            }
        }

        let order = Order {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            total_amount: req.total_amount,
            discount_amount: req.discount_amount,
            tax_amount: req.tax_amount,
            final_amount: req.final_amount,
            shipping_address: Json(req.shipping_address.clone()),
            payment_method: req.payment_method,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
            tracking_number: None,
            created_at: now,
            updated_at: now,
        };

        let items: Vec<OrderItem> = req
            .items
            .iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                order_id: order.id,
                product_id: item.product_id,
                vendor_id: item.vendor_id,
                quantity: item.quantity,
                price: item.price,
                total: item.total,
            })
            .collect();

        tables.orders.push(order.clone());
        tables.order_items.extend(items.iter().cloned());
        Ok((order, items))
    }

    async fn update_order(
        &self,
        id: Uuid,
        req: &UpdateOrderRequest,
    ) -> Result<Order, RepositoryError> {
        let mut tables = self.tables.write().await;
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(status) = req.order_status {
            order.order_status = status;
        }
        if let Some(status) = req.payment_status {
            order.payment_status = status;
        }
        if let Some(tracking) = &req.tracking_number {
            order.tracking_number = Some(tracking.clone());
        }
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}
