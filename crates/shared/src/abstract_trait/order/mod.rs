use crate::{
    domain::{
        Identity,
        requests::{
            CheckoutRequest, CreateOrderRecord, CreateOrderRequest, FindAllOrders,
            UpdateOrderRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Order, OrderItem},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderService = Arc<dyn OrderServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    /// Newest first; `user_id = None` lists every order.
    async fn find_all(
        &self,
        user_id: Option<Uuid>,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError>;
    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Order>, RepositoryError>;
    async fn find_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItem>, RepositoryError>;
    async fn find_all_orders(&self) -> Result<Vec<Order>, RepositoryError>;
    async fn find_all_items(&self) -> Result<Vec<OrderItem>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and its items, decrementing stock and bumping sales
    /// for each product. Fails with `Conflict` when any product runs short.
    async fn create_order(
        &self,
        req: &CreateOrderRecord,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError>;
    async fn update_order(
        &self,
        id: Uuid,
        req: &UpdateOrderRequest,
    ) -> Result<Order, RepositoryError>;
}

#[async_trait]
pub trait OrderServiceTrait {
    async fn create(
        &self,
        actor: &Identity,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn checkout(
        &self,
        actor: &Identity,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn find_mine(
        &self,
        actor: &Identity,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
    async fn find_for_vendor(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
