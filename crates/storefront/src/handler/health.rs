use axum::{Json, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;

const BANNER: &str = "Grocery storefront API";

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service banner"))
)]
pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": BANNER,
            "version": env!("CARGO_PKG_VERSION"),
            "docs": "/swagger-ui"
        })),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Liveness check"))
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub fn health_routes() -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(root_handler))
        .route("/health", get(health_checker_handler))
}
