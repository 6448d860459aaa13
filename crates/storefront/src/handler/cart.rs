use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    abstract_trait::DynCartService,
    domain::{
        Identity,
        requests::{AddCartItemRequest, RemoveCartItemQuery, UpdateCartItemRequest},
        responses::{ApiResponse, CartResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart with subtotal", body = ApiResponse<CartResponse>)
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added or quantity merged", body = ApiResponse<CartResponse>),
        (status = 400, description = "Unavailable product or insufficient stock"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add(&identity, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity set; zero or less removes the item", body = ApiResponse<CartResponse>),
        (status = 400, description = "Insufficient stock"),
        (status = 404, description = "Item not found in cart")
    )
)]
pub async fn update_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&identity, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(RemoveCartItemQuery),
    responses(
        (status = 200, description = "Item removed, or cart cleared without product_id", body = ApiResponse<CartResponse>),
        (status = 404, description = "Item not found in cart")
    )
)]
pub async fn remove_from_cart(
    Extension(service): Extension<DynCartService>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<RemoveCartItemQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove(&identity, params.product_id).await?;
    Ok(Json(response))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    OpenApiRouter::new()
        .route("/api/cart", get(get_cart))
        .route("/api/cart", post(add_to_cart))
        .route("/api/cart", put(update_cart))
        .route("/api/cart", delete(remove_from_cart))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(di.cart_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
