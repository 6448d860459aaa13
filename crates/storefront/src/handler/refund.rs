use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynRefundService,
    domain::{
        Identity,
        requests::{CreateRefundRequest, FindAllRefunds, UpdateRefundRequest},
        responses::{ApiResponse, ApiResponsePagination, RefundResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/refunds",
    tag = "Refund",
    security(("bearer_auth" = [])),
    params(FindAllRefunds),
    responses(
        (status = 200, description = "Refunds visible to the caller", body = ApiResponsePagination<Vec<RefundResponse>>),
        (status = 403, description = "Vendor not approved")
    )
)]
pub async fn get_refunds(
    Extension(service): Extension<DynRefundService>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<FindAllRefunds>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&identity, &params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/refunds",
    tag = "Refund",
    security(("bearer_auth" = [])),
    request_body = CreateRefundRequest,
    responses(
        (status = 201, description = "Refund requested", body = ApiResponse<RefundResponse>),
        (status = 400, description = "Duplicate request or amount above the order total"),
        (status = 404, description = "Order not found or does not belong to you")
    )
)]
pub async fn create_refund(
    Extension(service): Extension<DynRefundService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateRefundRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&identity, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/refunds/{id}",
    tag = "Refund",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Refund ID")),
    responses(
        (status = 200, description = "Refund details", body = ApiResponse<RefundResponse>),
        (status = 403, description = "Not involved in the refunded order"),
        (status = 404, description = "Refund not found")
    )
)]
pub async fn get_refund(
    Extension(service): Extension<DynRefundService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&identity, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/refunds/{id}",
    tag = "Refund",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Refund ID")),
    request_body = UpdateRefundRequest,
    responses(
        (status = 200, description = "Status moved", body = ApiResponse<RefundResponse>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Only admins decide; vendors may complete"),
        (status = 404, description = "Refund not found")
    )
)]
pub async fn update_refund(
    Extension(service): Extension<DynRefundService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateRefundRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_status(&identity, id, &body).await?;
    Ok(Json(response))
}

pub fn refund_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    OpenApiRouter::new()
        .route("/api/refunds", get(get_refunds))
        .route("/api/refunds", post(create_refund))
        .route("/api/refunds/{id}", get(get_refund))
        .route("/api/refunds/{id}", put(update_refund))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(di.refund_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
