mod analytics;
mod auth;
mod cart;
mod category;
mod health;
mod notification;
mod order;
mod product;
mod refund;
mod review;
mod user;
mod vendor;
mod wishlist;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::analytics::analytics_routes;
pub use self::auth::auth_routes;
pub use self::cart::cart_routes;
pub use self::category::category_routes;
pub use self::health::health_routes;
pub use self::notification::notification_routes;
pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::refund::refund_routes;
pub use self::review::review_routes;
pub use self::user::user_routes;
pub use self::vendor::vendor_routes;
pub use self::wishlist::wishlist_routes;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root_handler,
        health::health_checker_handler,

        auth::register_user_handler,
        auth::login_user_handler,
        auth::refresh_token_handler,
        auth::logout_handler,
        auth::get_me_handler,
        auth::gate_handler,

        user::get_users,
        user::get_user,
        user::update_me,
        user::admin_update_user,
        user::delete_user,

        vendor::get_vendors,
        vendor::get_vendor,
        vendor::apply_vendor,
        vendor::get_my_vendor,
        vendor::update_my_vendor,
        vendor::get_pending_vendors,
        vendor::get_all_vendors,
        vendor::review_vendor,
        vendor::reject_vendor,

        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
        product::get_pending_products,
        product::get_my_products,
        product::review_product,

        order::get_my_orders,
        order::create_order,
        order::checkout,
        order::get_all_orders,
        order::get_vendor_orders,
        order::get_order,
        order::update_order,

        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart,
        cart::remove_from_cart,

        review::get_reviews,
        review::create_review,
        review::get_review,
        review::update_review,
        review::delete_review,

        wishlist::get_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,

        refund::get_refunds,
        refund::create_refund,
        refund::get_refund,
        refund::update_refund,

        category::get_categories,
        category::create_category,

        notification::get_vendor_notifications,
        notification::get_vendor_unread_count,
        notification::mark_vendor_notification_read,
        notification::mark_all_vendor_notifications_read,
        notification::send_notification,
        notification::invite_best_seller,
        notification::get_notification_history,
        notification::get_admin_notifications,
        notification::get_admin_unread_count,
        notification::mark_admin_notification_read,
        notification::mark_all_admin_notifications_read,

        analytics::get_admin_analytics,
        analytics::get_vendor_analytics,
        analytics::get_user_analytics,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and banner"),
        (name = "Auth", description = "Authentication and route gate"),
        (name = "User", description = "User administration"),
        (name = "Vendor", description = "Vendor applications and profiles"),
        (name = "Product", description = "Catalog and moderation"),
        (name = "Order", description = "Orders and checkout"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Review", description = "Product reviews"),
        (name = "Wishlist", description = "Saved products"),
        (name = "Refund", description = "Refund requests and review"),
        (name = "Category", description = "Product categories"),
        (name = "Notification", description = "Vendor and admin inboxes"),
        (name = "Analytics", description = "Dashboard figures"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    /// Full application router, Swagger UI included.
    pub fn build(app_state: AppState) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(health_routes())
            .merge(auth_routes(shared_state.clone()))
            .merge(user_routes(shared_state.clone()))
            .merge(vendor_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()))
            .merge(review_routes(shared_state.clone()))
            .merge(wishlist_routes(shared_state.clone()))
            .merge(refund_routes(shared_state.clone()))
            .merge(category_routes(shared_state.clone()))
            .merge(notification_routes(shared_state.clone()))
            .merge(analytics_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
