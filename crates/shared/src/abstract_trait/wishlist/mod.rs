use crate::{
    domain::{
        Identity,
        requests::{AddWishlistItemRequest, RemoveWishlistItemQuery},
        responses::{ApiResponse, WishlistResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::WishlistItem,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynWishlistRepository = Arc<dyn WishlistRepositoryTrait + Send + Sync>;
pub type DynWishlistService = Arc<dyn WishlistServiceTrait + Send + Sync>;

#[async_trait]
pub trait WishlistRepositoryTrait {
    /// Most recently added first.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<WishlistItem>, RepositoryError>;
    /// Adding a product twice keeps the first entry.
    async fn add_item(&self, user_id: Uuid, product_id: Uuid) -> Result<(), RepositoryError>;
    async fn remove_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait WishlistServiceTrait {
    async fn get(&self, actor: &Identity) -> Result<ApiResponse<WishlistResponse>, ServiceError>;
    async fn add(
        &self,
        actor: &Identity,
        req: &AddWishlistItemRequest,
    ) -> Result<ApiResponse<WishlistResponse>, ServiceError>;
    async fn remove(
        &self,
        actor: &Identity,
        req: &RemoveWishlistItemQuery,
    ) -> Result<ApiResponse<WishlistResponse>, ServiceError>;
}
