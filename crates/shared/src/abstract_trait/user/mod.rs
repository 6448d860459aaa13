use crate::{
    domain::{
        Identity,
        requests::{AdminUpdateUserRequest, CreateUserRecord, FindAllUsers, UpdateProfileRequest},
        responses::{ApiResponse, ApiResponsePagination, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Role, User},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;
pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<User>, i64), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError>;
    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<User, RepositoryError>;
    async fn update_role(&self, id: Uuid, role: Role) -> Result<User, RepositoryError>;
    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<User, RepositoryError>;
    async fn touch_last_login(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// Removes the user with everything they own. Fails with `ForeignKey`
    /// while their store has lines on placed orders.
    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait UserServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_me(
        &self,
        actor: &Identity,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn admin_update(
        &self,
        id: Uuid,
        req: &AdminUpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn delete(&self, actor: &Identity, id: Uuid) -> Result<ApiResponse<()>, ServiceError>;
}
