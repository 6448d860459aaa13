use crate::{abstract_trait::WishlistRepositoryTrait, errors::RepositoryError, model::WishlistItem};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{MemoryDatabase, newest_first};

#[async_trait]
impl WishlistRepositoryTrait for MemoryDatabase {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .wishlist_items
                .iter()
                .filter(|w| w.user_id == user_id)
                .cloned(),
            |w| w.added_at,
        ))
    }

    async fn add_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.products.iter().any(|p| p.id == product_id) {
            return Err(RepositoryError::ForeignKey("wishlist_items_product_id_fkey".into()));
        }

        if !tables
            .wishlist_items
            .iter()
            .any(|w| w.user_id == user_id && w.product_id == product_id)
        {
            tables.wishlist_items.push(WishlistItem {
                user_id,
                product_id,
                added_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn remove_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.wishlist_items.len();
        tables
            .wishlist_items
            .retain(|w| !(w.user_id == user_id && w.product_id == product_id));
        Ok(tables.wishlist_items.len() < before)
    }
}
