use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    abstract_trait::DynWishlistService,
    domain::{
        Identity,
        requests::{AddWishlistItemRequest, RemoveWishlistItemQuery},
        responses::{ApiResponse, WishlistResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/wishlist",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved products, newest first", body = ApiResponse<WishlistResponse>)
    )
)]
pub async fn get_wishlist(
    Extension(service): Extension<DynWishlistService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    request_body = AddWishlistItemRequest,
    responses(
        (status = 200, description = "Product saved; saving twice is a no-op", body = ApiResponse<WishlistResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_wishlist(
    Extension(service): Extension<DynWishlistService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddWishlistItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add(&identity, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist",
    tag = "Wishlist",
    security(("bearer_auth" = [])),
    params(RemoveWishlistItemQuery),
    responses(
        (status = 200, description = "Product removed", body = ApiResponse<WishlistResponse>),
        (status = 400, description = "Product ID is required")
    )
)]
pub async fn remove_from_wishlist(
    Extension(service): Extension<DynWishlistService>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<RemoveWishlistItemQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove(&identity, &params).await?;
    Ok(Json(response))
}

pub fn wishlist_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    OpenApiRouter::new()
        .route("/api/wishlist", get(get_wishlist))
        .route("/api/wishlist", post(add_to_wishlist))
        .route("/api/wishlist", delete(remove_from_wishlist))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(di.wishlist_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
