use crate::{
    domain::{
        Identity,
        requests::{CreateReviewRecord, CreateReviewRequest, FindAllReviews, UpdateReviewRequest},
        responses::{ApiResponse, ApiResponsePagination, ReviewResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Review,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynReviewRepository = Arc<dyn ReviewRepositoryTrait + Send + Sync>;
pub type DynReviewService = Arc<dyn ReviewServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReviewRepositoryTrait {
    async fn find_all(&self, req: &FindAllReviews) -> Result<(Vec<Review>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError>;
    async fn find_by_product_and_user(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, RepositoryError>;
    async fn create(&self, req: &CreateReviewRecord) -> Result<Review, RepositoryError>;
    async fn update(
        &self,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<Review, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn ratings_for_product(&self, product_id: Uuid) -> Result<Vec<i32>, RepositoryError>;
}

#[async_trait]
pub trait ReviewServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllReviews,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn create(
        &self,
        actor: &Identity,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    /// Only the author may edit a review.
    async fn update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    /// The author or an admin may delete a review.
    async fn delete(&self, actor: &Identity, id: Uuid) -> Result<ApiResponse<()>, ServiceError>;
}
