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
    abstract_trait::DynReviewService,
    domain::{
        Identity,
        requests::{CreateReviewRequest, FindAllReviews, UpdateReviewRequest},
        responses::{ApiResponse, ApiResponsePagination, ReviewResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Review",
    params(FindAllReviews),
    responses(
        (status = 200, description = "Reviews", body = ApiResponsePagination<Vec<ReviewResponse>>)
    )
)]
pub async fn get_reviews(
    Extension(service): Extension<DynReviewService>,
    Query(params): Query<FindAllReviews>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Review",
    security(("bearer_auth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review stored, product rating recomputed", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Already reviewed or rating out of range"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn create_review(
    Extension(service): Extension<DynReviewService>,
    Extension(identity): Extension<Identity>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&identity, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "Review",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = ApiResponse<ReviewResponse>),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    Extension(service): Extension<DynReviewService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated, product rating recomputed", body = ApiResponse<ReviewResponse>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    Extension(service): Extension<DynReviewService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&identity, id, &body).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted, product rating recomputed"),
        (status = 403, description = "Neither the author nor an admin"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    Extension(service): Extension<DynReviewService>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(&identity, id).await?;
    Ok(Json(response))
}

pub fn review_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let public_routes = OpenApiRouter::new()
        .route("/api/reviews", get(get_reviews))
        .route("/api/reviews/{id}", get(get_review));

    let private_routes = OpenApiRouter::new()
        .route("/api/reviews", post(create_review))
        .route("/api/reviews/{id}", put(update_review).delete(delete_review))
        .route_layer(middleware::from_fn(auth_middleware));

    public_routes
        .merge(private_routes)
        .layer(Extension(di.review_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
