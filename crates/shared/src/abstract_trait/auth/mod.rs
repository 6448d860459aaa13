use crate::{
    domain::{
        Identity,
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn refresh(&self, refresh_token: &str)
    -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn me(&self, actor: &Identity) -> Result<ApiResponse<UserResponse>, ServiceError>;
    /// Verifies an access token and loads the current user behind it.
    async fn identify(&self, access_token: &str) -> Result<Identity, ServiceError>;
}
