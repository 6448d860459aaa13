use crate::{
    abstract_trait::CartRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::CartItem,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const CART_COLUMNS: &str = "user_id, product_id, vendor_id, quantity, price, added_at";

#[derive(Clone)]
pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_COLUMNS} FROM cart_items WHERE user_id = $1 ORDER BY added_at"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch cart for {user_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_COLUMNS} FROM cart_items WHERE user_id = $1 AND product_id = $2"
        ))
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn upsert_item(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
        let saved = sqlx::query_as::<_, CartItem>(&format!(
            "INSERT INTO cart_items (user_id, product_id, vendor_id, quantity, price, added_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, product_id) DO UPDATE SET \
             quantity = EXCLUDED.quantity, price = EXCLUDED.price, vendor_id = EXCLUDED.vendor_id \
             RETURNING {CART_COLUMNS}"
        ))
        .bind(item.user_id)
        .bind(item.product_id)
        .bind(item.vendor_id)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.added_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to save cart line {}: {e:?}", item.product_id);
            RepositoryError::from(e)
        })?;

        info!("🛒 Cart {} now holds {} x {}", saved.user_id, saved.quantity, saved.product_id);
        Ok(saved)
    }

    async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
