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
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    abstract_trait::DynProductService,
    domain::{
        Identity,
        requests::{
            CreateProductRequest, FindAllProducts, PageQuery, ReviewProductRequest,
            UpdateProductRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "Approved products of approved vendors", body = ApiResponsePagination<Vec<ProductResponse>>)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_public(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created, pending review", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Not a vendor or admin, or vendor not approved"),
        (status = 404, description = "Vendor profile not found")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&identity, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Not the owning vendor"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&identity, id, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Not the owning vendor"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product has orders")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(&identity, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/pending",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Products awaiting review", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_pending_products(
    Extension(service): Extension<DynProductService>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_pending(params.page, params.limit).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/mine",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Own products in any status", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 403, description = "Vendor only")
    )
)]
pub async fn get_my_products(
    Extension(service): Extension<DynProductService>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .find_mine(&identity, params.page, params.limit)
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}/review",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ReviewProductRequest,
    responses(
        (status = 200, description = "Status written", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn review_product(
    Extension(service): Extension<DynProductService>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<ReviewProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.review(id, &body).await?;
    Ok(Json(response))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let public_routes = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products/{id}", get(get_product));

    let private_routes = OpenApiRouter::new()
        .route("/api/products", post(create_product))
        .route("/api/products/{id}", put(update_product))
        .route("/api/products/{id}", delete(delete_product))
        .route_layer(middleware::from_fn(auth_middleware));

    let vendor_routes = OpenApiRouter::new()
        .route("/api/products/mine", get(get_my_products))
        .route_layer(middleware::from_fn(require_vendor))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/products/pending", get(get_pending_products))
        .route("/api/products/{id}/review", put(review_product))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(auth_middleware));

    public_routes
        .merge(private_routes)
        .merge(vendor_routes)
        .merge(admin_routes)
        .layer(Extension(di.product_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
