use crate::{
    middleware::{
        jwt::auth_middleware,
        rbac::{require_admin, require_vendor},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynNotificationService,
    domain::{
        Identity,
        requests::{BestSellerInviteRequest, SendNotificationRequest},
        responses::{
            ApiResponse, DeliveryResponse, NotificationHistoryResponse, NotificationResponse,
            UnreadCountResponse,
        },
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/vendor/notifications",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vendor inbox, newest first", body = ApiResponse<Vec<NotificationResponse>>),
        (status = 403, description = "Vendor only or not approved")
    )
)]
pub async fn get_vendor_notifications(
    Extension(service): Extension<DynNotificationService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.vendor_inbox(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/vendor/notifications/unread-count",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread notifications in the vendor inbox", body = ApiResponse<UnreadCountResponse>)
    )
)]
pub async fn get_vendor_unread_count(
    Extension(service): Extension<DynNotificationService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.vendor_unread_count(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/vendor/notifications/{id}/read",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_vendor_notification_read(
    Extension(service): Extension<DynNotificationService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.vendor_mark_read(&identity, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/vendor/notifications/read-all",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of notifications marked", body = ApiResponse<UnreadCountResponse>)
    )
)]
pub async fn mark_all_vendor_notifications_read(
    Extension(service): Extension<DynNotificationService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.vendor_mark_all_read(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/admin/notifications/send",
    tag = "Notification",
    security(("bearer_auth" = [])),
    request_body = SendNotificationRequest,
    responses(
        (status = 201, description = "Delivered to one vendor or every approved vendor", body = ApiResponse<DeliveryResponse>),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn send_notification(
    Extension(service): Extension<DynNotificationService>,
    SimpleValidatedJson(body): SimpleValidatedJson<SendNotificationRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.send(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admin/notifications/best-seller",
    tag = "Notification",
    security(("bearer_auth" = [])),
    request_body = BestSellerInviteRequest,
    responses(
        (status = 201, description = "Invitation sent", body = ApiResponse<NotificationResponse>),
        (status = 400, description = "Vendor not approved"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn invite_best_seller(
    Extension(service): Extension<DynNotificationService>,
    SimpleValidatedJson(body): SimpleValidatedJson<BestSellerInviteRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.invite_best_seller(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/notifications/history",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Latest notifications sent to vendors", body = ApiResponse<Vec<NotificationHistoryResponse>>)
    )
)]
pub async fn get_notification_history(
    Extension(service): Extension<DynNotificationService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.history().await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/notifications",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin inbox, newest first", body = ApiResponse<Vec<NotificationResponse>>)
    )
)]
pub async fn get_admin_notifications(
    Extension(service): Extension<DynNotificationService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin_inbox().await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/admin/notifications/unread-count",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread notifications in the admin inbox", body = ApiResponse<UnreadCountResponse>)
    )
)]
pub async fn get_admin_unread_count(
    Extension(service): Extension<DynNotificationService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin_unread_count().await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/admin/notifications/{id}/read",
    tag = "Notification",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<NotificationResponse>),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_admin_notification_read(
    Extension(service): Extension<DynNotificationService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin_mark_read(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/admin/notifications/read-all",
    tag = "Notification",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of notifications marked", body = ApiResponse<UnreadCountResponse>)
    )
)]
pub async fn mark_all_admin_notifications_read(
    Extension(service): Extension<DynNotificationService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin_mark_all_read().await?;
    Ok(Json(response))
}

pub fn notification_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let vendor_routes = OpenApiRouter::new()
        .route("/api/vendor/notifications", get(get_vendor_notifications))
        .route(
            "/api/vendor/notifications/unread-count",
            get(get_vendor_unread_count),
        )
        .route(
            "/api/vendor/notifications/read-all",
            put(mark_all_vendor_notifications_read),
        )
        .route(
            "/api/vendor/notifications/{id}/read",
            put(mark_vendor_notification_read),
        )
        .route_layer(middleware::from_fn(require_vendor))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/admin/notifications", get(get_admin_notifications))
        .route("/api/admin/notifications/send", post(send_notification))
        .route(
            "/api/admin/notifications/best-seller",
            post(invite_best_seller),
        )
        .route(
            "/api/admin/notifications/history",
            get(get_notification_history),
        )
        .route(
            "/api/admin/notifications/unread-count",
            get(get_admin_unread_count),
        )
        .route(
            "/api/admin/notifications/read-all",
            put(mark_all_admin_notifications_read),
        )
        .route(
            "/api/admin/notifications/{id}/read",
            put(mark_admin_notification_read),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(auth_middleware));

    vendor_routes
        .merge(admin_routes)
        .layer(Extension(di.notification_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
