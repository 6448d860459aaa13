use crate::{
    domain::{
        Identity,
        requests::{
            CreateRefundRecord, CreateRefundRequest, FindAllRefunds, RefundScope,
            UpdateRefundRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, RefundResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Refund, RefundStatus},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynRefundRepository = Arc<dyn RefundRepositoryTrait + Send + Sync>;
pub type DynRefundService = Arc<dyn RefundServiceTrait + Send + Sync>;

#[async_trait]
pub trait RefundRepositoryTrait {
    /// Newest first.
    async fn find_all(
        &self,
        scope: RefundScope,
        req: &FindAllRefunds,
    ) -> Result<(Vec<Refund>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Refund>, RepositoryError>;
    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Refund>, RepositoryError>;
    /// Fails with `AlreadyExists` when the order already has a refund.
    async fn create(&self, req: &CreateRefundRecord) -> Result<Refund, RepositoryError>;
    /// Stamps `processed_at` when the refund is completed.
    async fn update_status(
        &self,
        id: Uuid,
        status: RefundStatus,
        admin_note: Option<&str>,
    ) -> Result<Refund, RepositoryError>;
}

#[async_trait]
pub trait RefundServiceTrait {
    async fn find_all(
        &self,
        actor: &Identity,
        req: &FindAllRefunds,
    ) -> Result<ApiResponsePagination<Vec<RefundResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<RefundResponse>, ServiceError>;
    async fn create(
        &self,
        actor: &Identity,
        req: &CreateRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>, ServiceError>;
    async fn update_status(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>, ServiceError>;
}
