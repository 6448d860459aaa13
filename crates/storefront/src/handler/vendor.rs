use crate::{
    middleware::{jwt::auth_middleware, rbac::require_admin, validate::SimpleValidatedJson},
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
    abstract_trait::DynVendorService,
    domain::{
        Identity,
        requests::{
            CreateVendorRequest, FindAllVendors, PageQuery, RejectVendorRequest,
            ReviewVendorRequest, UpdateVendorProfileRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, VendorResponse},
    },
    errors::HttpError,
    model::VendorStatus,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/vendors",
    tag = "Vendor",
    params(FindAllVendors),
    responses(
        (status = 200, description = "Approved vendors", body = ApiResponsePagination<Vec<VendorResponse>>)
    )
)]
pub async fn get_vendors(
    Extension(service): Extension<DynVendorService>,
    Query(params): Query<FindAllVendors>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_public(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    tag = "Vendor",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor details", body = ApiResponse<VendorResponse>),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn get_vendor(
    Extension(service): Extension<DynVendorService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/vendors",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    request_body = CreateVendorRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<VendorResponse>),
        (status = 409, description = "Profile exists or store name taken")
    )
)]
pub async fn apply_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateVendorRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.apply(&identity, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/vendors/me",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own vendor profile", body = ApiResponse<VendorResponse>),
        (status = 404, description = "Vendor profile not found")
    )
)]
pub async fn get_my_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.my_profile(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/vendors/me",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    request_body = UpdateVendorProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<VendorResponse>),
        (status = 404, description = "Vendor profile not found")
    )
)]
pub async fn update_my_vendor(
    Extension(service): Extension<DynVendorService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateVendorProfileRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_my_profile(&identity, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/vendors/pending",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Vendors awaiting review", body = ApiResponsePagination<Vec<VendorResponse>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_pending_vendors(
    Extension(service): Extension<DynVendorService>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_pending(params.page, params.limit).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/vendors/all",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(FindAllVendors),
    responses(
        (status = 200, description = "Vendors in any status", body = ApiResponsePagination<Vec<VendorResponse>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_all_vendors(
    Extension(service): Extension<DynVendorService>,
    Query(params): Query<FindAllVendors>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/vendors/approve",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    request_body = ReviewVendorRequest,
    responses(
        (status = 200, description = "Status written; approval promotes the owner to vendor", body = ApiResponse<VendorResponse>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn review_vendor(
    Extension(service): Extension<DynVendorService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ReviewVendorRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.review(&body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/vendors/{id}/reject",
    tag = "Vendor",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Vendor ID")),
    request_body = RejectVendorRequest,
    responses(
        (status = 200, description = "Vendor rejected", body = ApiResponse<VendorResponse>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn reject_vendor(
    Extension(service): Extension<DynVendorService>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<RejectVendorRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let request = ReviewVendorRequest {
        vendor_id: id,
        status: VendorStatus::Rejected,
        reason: Some(body.reason),
    };
    let response = service.review(&request).await?;
    Ok(Json(response))
}

pub fn vendor_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let public_routes = OpenApiRouter::new()
        .route("/api/vendors", get(get_vendors))
        .route("/api/vendors/{id}", get(get_vendor));

    let private_routes = OpenApiRouter::new()
        .route("/api/vendors", post(apply_vendor))
        .route("/api/vendors/me", get(get_my_vendor))
        .route("/api/vendors/me", put(update_my_vendor))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/vendors/pending", get(get_pending_vendors))
        .route("/api/vendors/all", get(get_all_vendors))
        .route("/api/vendors/approve", put(review_vendor))
        .route("/api/vendors/{id}/reject", put(reject_vendor))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(auth_middleware));

    public_routes
        .merge(private_routes)
        .merge(admin_routes)
        .layer(Extension(di.vendor_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
