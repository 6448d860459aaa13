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
    routing::{get, post, put},
};
use shared::{
    abstract_trait::DynOrderService,
    domain::{
        Identity,
        requests::{CheckoutRequest, CreateOrderRequest, FindAllOrders, UpdateOrderRequest},
        responses::{ApiResponse, ApiResponsePagination, OrderResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Own orders, newest first", body = ApiResponsePagination<Vec<OrderResponse>>)
    )
)]
pub async fn get_my_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(&identity, &params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Unavailable product or insufficient stock"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&identity, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Cart turned into an order", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Cart is empty or stock ran out")
    )
)]
pub async fn checkout(
    Extension(service): Extension<DynOrderService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<CheckoutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.checkout(&identity, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/all",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Every order", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_all_orders(
    Extension(service): Extension<DynOrderService>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/orders/vendor",
    tag = "Order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders holding the vendor's items", body = ApiResponse<Vec<OrderResponse>>),
        (status = 403, description = "Vendor only or not approved")
    )
)]
pub async fn get_vendor_orders(
    Extension(service): Extension<DynOrderService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_for_vendor(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not the buyer, an involved vendor or an admin"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&identity, id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Not an admin or involved vendor"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    Extension(service): Extension<DynOrderService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&identity, id, &body).await?;
    Ok(Json(response))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let private_routes = OpenApiRouter::new()
        .route("/api/orders", get(get_my_orders))
        .route("/api/orders", post(create_order))
        .route("/api/orders/checkout", post(checkout))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}", put(update_order))
        .route_layer(middleware::from_fn(auth_middleware));

    let vendor_routes = OpenApiRouter::new()
        .route("/api/orders/vendor", get(get_vendor_orders))
        .route_layer(middleware::from_fn(require_vendor))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/orders/all", get(get_all_orders))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(auth_middleware));

    private_routes
        .merge(vendor_routes)
        .merge(admin_routes)
        .layer(Extension(di.order_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
