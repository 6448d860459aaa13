use crate::{
    domain::{
        Identity,
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::CartItem,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;
pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepositoryError>;
    async fn find_item(
        &self,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError>;
    /// Inserts or overwrites the line for `(user_id, product_id)`.
    async fn upsert_item(&self, item: &CartItem) -> Result<CartItem, RepositoryError>;
    async fn remove_item(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, RepositoryError>;
    async fn clear(&self, user_id: Uuid) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait CartServiceTrait {
    async fn get(&self, actor: &Identity) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add(
        &self,
        actor: &Identity,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn update(
        &self,
        actor: &Identity,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove(
        &self,
        actor: &Identity,
        product_id: Option<Uuid>,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
}
