use crate::{abstract_trait::CartRepositoryTrait, errors::RepositoryError, model::CartItem};
use async_trait::async_trait;
use uuid::Uuid;

use super::MemoryDatabase;

#[async_trait]
impl CartRepositoryTrait for MemoryDatabase {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cart_items
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cart_items
            .iter()
            .find(|c| c.user_id == user_id && c.product_id == product_id)
            .cloned())
    }

    async fn upsert_item(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        let mut tables = self.tables.write().await;

        match tables
            .cart_items
            .iter_mut()
            .find(|c| c.user_id == item.user_id && c.product_id == item.product_id)
        {
            Some(existing) => {
                existing.quantity = item.quantity;
                existing.price = item.price;
                existing.vendor_id = item.vendor_id;
                Ok(existing.clone())
            }
            None => {
                tables.cart_items.push(item.clone());
                Ok(item.clone())
            }
        }
    }

    async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.cart_items.len();
        tables
            .cart_items
            .retain(|c| !(c.user_id == user_id && c.product_id == product_id));
        Ok(tables.cart_items.len() < before)
    }

    async fn clear(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.cart_items.len();
        tables.cart_items.retain(|c| c.user_id != user_id);
        Ok((before - tables.cart_items.len()) as u64)
    }
}
