use crate::{
    domain::{
        Identity,
        requests::{
            CreateProductRecord, CreateProductRequest, FindAllProducts, ProductListFilter,
            ReviewProductRequest, UpdateProductRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Product, ProductStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(
        &self,
        filter: &ProductListFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
    async fn count_by_vendor(&self, vendor_id: Uuid) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, req: &CreateProductRecord)
    -> Result<Product, RepositoryError>;
    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ProductStatus,
        rejection_reason: Option<String>,
        approved_at: Option<DateTime<Utc>>,
    ) -> Result<Product, RepositoryError>;
    async fn update_rating(
        &self,
        id: Uuid,
        rating: f64,
        review_count: i32,
    ) -> Result<Product, RepositoryError>;
    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ProductServiceTrait {
    async fn find_public(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn find_pending(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_mine(
        &self,
        actor: &Identity,
        page: i64,
        limit: i64,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn create(
        &self,
        actor: &Identity,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete(&self, actor: &Identity, id: Uuid) -> Result<ApiResponse<()>, ServiceError>;
    async fn review(
        &self,
        id: Uuid,
        req: &ReviewProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
