use crate::{
    abstract_trait::WishlistRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::WishlistItem,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct WishlistRepository {
    db: ConnectionPool,
}

impl WishlistRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WishlistRepositoryTrait for WishlistRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, RepositoryError> {
        sqlx::query_as::<_, WishlistItem>(
            "SELECT user_id, product_id, added_at FROM wishlist_items \
             WHERE user_id = $1 ORDER BY added_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch wishlist for {user_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn add_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO wishlist_items (user_id, product_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to add {product_id} to wishlist of {user_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        if result.rows_affected() > 0 {
            info!("💚 {user_id} wishlisted {product_id}");
        }
        Ok(())
    }

    async fn remove_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(&self.db)
                .await
                .map_err(RepositoryError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
