use crate::{
    middleware::{jwt::auth_middleware, rbac::require_admin, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, put},
};
use shared::{
    abstract_trait::DynUserService,
    domain::{
        Identity,
        requests::{AdminUpdateUserRequest, FindAllUsers, UpdateProfileRequest},
        responses::{ApiResponse, ApiResponsePagination, UserResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "User",
    security(("bearer_auth" = [])),
    params(FindAllUsers),
    responses(
        (status = 200, description = "List of users", body = ApiResponsePagination<Vec<UserResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_users(
    Extension(service): Extension<DynUserService>,
    Query(params): Query<FindAllUsers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not yourself and not an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(service): Extension<DynUserService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&identity, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn update_me(
    Extension(service): Extension<DynUserService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_me(&identity, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = AdminUpdateUserRequest,
    responses(
        (status = 200, description = "Role or block flag updated", body = ApiResponse<UserResponse>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn admin_update_user(
    Extension(service): Extension<DynUserService>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin_update(id, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User and everything they own removed"),
        (status = 400, description = "Cannot delete yourself"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Their store has order history")
    )
)]
pub async fn delete_user(
    Extension(service): Extension<DynUserService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(&identity, id).await?;
    Ok(Json(response))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let private_routes = OpenApiRouter::new()
        .route("/api/users/me", put(update_me))
        .route("/api/users/{id}", get(get_user))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/users", get(get_users))
        .route("/api/users/{id}", put(admin_update_user))
        .route("/api/users/{id}", delete(delete_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(auth_middleware));

    private_routes
        .merge(admin_routes)
        .layer(Extension(di.user_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
