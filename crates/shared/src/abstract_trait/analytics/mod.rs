use crate::{
    domain::{
        Identity,
        responses::{
            AdminAnalyticsResponse, ApiResponse, UserAnalyticsResponse, VendorAnalyticsResponse,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAnalyticsService = Arc<dyn AnalyticsServiceTrait + Send + Sync>;

#[async_trait]
pub trait AnalyticsServiceTrait {
    async fn admin(&self) -> Result<ApiResponse<AdminAnalyticsResponse>, ServiceError>;
    async fn vendor(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<VendorAnalyticsResponse>, ServiceError>;
    async fn user(&self, actor: &Identity)
    -> Result<ApiResponse<UserAnalyticsResponse>, ServiceError>;
}
