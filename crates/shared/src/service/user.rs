use crate::{
    abstract_trait::{DynUserCommandRepository, DynUserQueryRepository, UserServiceTrait},
    domain::{
        Identity,
        requests::{AdminUpdateUserRequest, FindAllUsers, UpdateProfileRequest, page_bounds},
        responses::{ApiResponse, ApiResponsePagination, Pagination, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;
use uuid::Uuid;

const USER_NOT_FOUND: &str = "User not found";

pub struct UserService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    telemetry: ServiceTelemetry,
}

impl UserService {
    pub fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            command,
            telemetry: ServiceTelemetry::new("user-service", registry),
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        info!("🔍 Listing users page={} limit={}", req.page, req.limit);

        let (page, limit, _) = page_bounds(req.page, req.limit);
        let tracing_ctx = self.telemetry.start(
            "find_all_users",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("page", page),
                KeyValue::new("limit", limit),
            ],
        );

        let (users, total) = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Users fetched",
            self.query.find_all(req).await,
        )?;

        Ok(ApiResponsePagination::new(
            users.into_iter().map(UserResponse::from).collect(),
            Pagination::new(page, limit, total),
        ))
    }

    async fn find_by_id(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        if !actor.is_admin() && actor.user_id != id {
            return Err(ServiceError::Forbidden("Access denied".into()));
        }

        let user = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.into()))?;

        Ok(ApiResponse::success(UserResponse::from(user)))
    }

    async fn update_me(
        &self,
        actor: &Identity,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "update_profile",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let user = self.telemetry.finish(
            &tracing_ctx,
            Method::Put,
            "Profile updated",
            self.command
                .update_profile(actor.user_id, req)
                .await
                .map_err(|e| ServiceError::not_found_or(e, USER_NOT_FOUND)),
        )?;

        Ok(ApiResponse::with_message(
            "Profile updated successfully",
            UserResponse::from(user),
        ))
    }

    async fn admin_update(
        &self,
        id: Uuid,
        req: &AdminUpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("🛠️ Admin update of user {id}: {req:?}");

        let tracing_ctx = self.telemetry.start(
            "admin_update_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = async {
            let mut user = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.into()))?;

            if let Some(role) = req.role {
                user = self.command.update_role(id, role).await?;
            }
            if let Some(blocked) = req.is_blocked {
                user = self.command.set_blocked(id, blocked).await?;
            }

            Ok::<_, ServiceError>(user)
        }
        .await;

        let user = self
            .telemetry
            .finish(&tracing_ctx, Method::Put, "User updated", result)?;

        Ok(ApiResponse::with_message(
            "User updated successfully",
            UserResponse::from(user),
        ))
    }

    async fn delete(&self, actor: &Identity, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        if actor.user_id == id {
            return Err(ServiceError::BadRequest("You cannot delete your own account".into()));
        }

        let tracing_ctx = self.telemetry.start(
            "delete_user",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id.to_string()),
            ],
        );

        let result = self.command.delete_user(id).await.map_err(|err| match err {
            RepositoryError::ForeignKey(_) => ServiceError::Conflict(
                "User's store has order history and cannot be deleted".into(),
            ),
            other => ServiceError::not_found_or(other, USER_NOT_FOUND),
        });

        self.telemetry
            .finish(&tracing_ctx, Method::Delete, "User deleted", result)?;

        info!("🗑️ {} deleted user {id}", actor.email);
        Ok(ApiResponse::with_message("User deleted successfully", ()))
    }
}
