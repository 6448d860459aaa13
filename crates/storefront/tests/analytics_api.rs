mod common;

use axum::http::StatusCode;
use common::{TestApp, shipping_address};
use serde_json::json;

async fn place_order(app: &TestApp, token: &str, product_id: &str, quantity: i32) {
    let (status, body) = app
        .post(
            "/api/orders",
            Some(token),
            json!({
                "items": [{ "product_id": product_id, "quantity": quantity }],
                "shipping_address": shipping_address(),
                "payment_method": "upi"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[tokio::test]
async fn dashboards_reflect_placed_orders() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    place_order(&app, &asha, &mango, 2).await;
    place_order(&app, &asha, &rice, 1).await;

    let (status, user) = app.get("/api/analytics/user", Some(&asha)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["data"]["totals"]["orders"], 2);
    assert_eq!(user["data"]["totals"]["spent"], 25000);
    assert_eq!(user["data"]["favorite_categories"][0]["category"], "Fruits");

    let (_, stats) = app.get("/api/analytics/vendor", Some(&vendor)).await;
    assert_eq!(stats["data"]["totals"]["products"], 2);
    assert_eq!(stats["data"]["totals"]["sales"], 25000);
    assert_eq!(stats["data"]["top_products"][0]["name"], "Mango");

    let admin = app.admin_token().await;
    let (_, stats) = app.get("/api/analytics/admin", Some(&admin)).await;
    assert_eq!(stats["data"]["totals"]["orders"], 2);
    assert_eq!(stats["data"]["totals"]["sales"], 25000);
    assert_eq!(stats["data"]["top_vendors"][0]["store_name"], "Ravi Fresh");
}

#[tokio::test]
async fn vendor_dashboard_is_closed_to_customers() {
    let app = TestApp::new().await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, _) = app.get("/api/analytics/vendor", Some(&asha)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
