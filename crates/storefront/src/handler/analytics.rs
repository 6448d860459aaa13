use crate::{
    middleware::{
        jwt::auth_middleware,
        rbac::{require_admin, require_vendor},
    },
    state::AppState,
};
use axum::{
    Json, extract::Extension, middleware, response::IntoResponse, routing::get,
};
use shared::{
    abstract_trait::DynAnalyticsService,
    domain::{
        Identity,
        responses::{
            AdminAnalyticsResponse, ApiResponse, UserAnalyticsResponse, VendorAnalyticsResponse,
        },
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/analytics/admin",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform totals, last 30 days and top sellers", body = ApiResponse<AdminAnalyticsResponse>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_admin_analytics(
    Extension(service): Extension<DynAnalyticsService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.admin().await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/analytics/vendor",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vendor totals and top products", body = ApiResponse<VendorAnalyticsResponse>),
        (status = 403, description = "Vendor only"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn get_vendor_analytics(
    Extension(service): Extension<DynAnalyticsService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.vendor(&identity).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/analytics/user",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Spending and favourite categories", body = ApiResponse<UserAnalyticsResponse>)
    )
)]
pub async fn get_user_analytics(
    Extension(service): Extension<DynAnalyticsService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.user(&identity).await?;
    Ok(Json(response))
}

pub fn analytics_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let private_routes = OpenApiRouter::new()
        .route("/api/analytics/user", get(get_user_analytics))
        .route_layer(middleware::from_fn(auth_middleware));

    let vendor_routes = OpenApiRouter::new()
        .route("/api/analytics/vendor", get(get_vendor_analytics))
        .route_layer(middleware::from_fn(require_vendor))
        .route_layer(middleware::from_fn(auth_middleware));

    let admin_routes = OpenApiRouter::new()
        .route("/api/analytics/admin", get(get_admin_analytics))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn(auth_middleware));

    private_routes
        .merge(vendor_routes)
        .merge(admin_routes)
        .layer(Extension(di.analytics_service.clone()))
        .layer(Extension(di.auth_service.clone()))
}
