mod common;

use axum::http::StatusCode;
use common::{TestApp, shipping_address};
use serde_json::json;

#[tokio::test]
async fn vendor_is_told_about_approval_and_can_mark_it_read() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;

    let (status, inbox) = app.get("/api/vendor/notifications", Some(&vendor)).await;
    assert_eq!(status, StatusCode::OK);
    let first = &inbox["data"][0];
    assert_eq!(first["kind"], "system");
    assert_eq!(first["is_read"], false);
    let id = first["id"].as_str().unwrap().to_string();

    let (_, unread) = app
        .get("/api/vendor/notifications/unread-count", Some(&vendor))
        .await;
    assert_eq!(unread["data"]["count"], 1);

    let (status, body) = app
        .put(
            &format!("/api/vendor/notifications/{id}/read"),
            Some(&vendor),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_read"], true);

    let (_, unread) = app
        .get("/api/vendor/notifications/unread-count", Some(&vendor))
        .await;
    assert_eq!(unread["data"]["count"], 0);
}

#[tokio::test]
async fn admin_hears_about_applications_and_orders() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 5).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    app.post(
        "/api/orders",
        Some(&asha),
        json!({
            "items": [{ "product_id": mango, "quantity": 1 }],
            "shipping_address": shipping_address(),
            "payment_method": "upi"
        }),
    )
    .await;

    let admin = app.admin_token().await;
    let (_, inbox) = app.get("/api/admin/notifications", Some(&admin)).await;
    let kinds: Vec<&str> = inbox["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|n| n["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"new_vendor"), "{kinds:?}");
    assert!(kinds.contains(&"new_order"), "{kinds:?}");

    let (_, body) = app
        .put("/api/admin/notifications/read-all", Some(&admin), json!({}))
        .await;
    assert_eq!(body["data"]["count"], 2);

    let (_, vendor_inbox) = app.get("/api/vendor/notifications", Some(&vendor)).await;
    assert!(
        vendor_inbox["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["kind"] == "new_order")
    );
}

#[tokio::test]
async fn broadcast_reaches_every_approved_vendor() {
    let app = TestApp::new().await;
    let (ravi, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    app.approved_vendor("meera@example.com", "Meera Greens").await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/admin/notifications/send",
            Some(&admin),
            json!({ "title": "Diwali sale", "message": "Stock up before the rush" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["recipients"], 2);

    let (_, inbox) = app.get("/api/vendor/notifications", Some(&ravi)).await;
    assert_eq!(inbox["data"][0]["title"], "Diwali sale");

    let (_, history) = app
        .get("/api/admin/notifications/history", Some(&admin))
        .await;
    assert!(
        history["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["vendor_name"] == "Meera Greens")
    );
}

#[tokio::test]
async fn best_seller_invite_requires_approved_vendor() {
    let app = TestApp::new().await;
    let (token, _) = app.customer("Ravi", "ravi@example.com").await;
    let (_, body) = app
        .post(
            "/api/vendors",
            Some(&token),
            json!({ "store_name": "Ravi Fresh", "contact_email": "ravi@example.com" }),
        )
        .await;
    let vendor_id = body["data"]["id"].as_str().unwrap().to_string();
    let admin = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/admin/notifications/best-seller",
            Some(&admin),
            json!({ "vendor_id": vendor_id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Only approved vendors can be invited");

    app.put(
        "/api/vendors/approve",
        Some(&admin),
        json!({ "vendor_id": vendor_id, "status": "approved" }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/admin/notifications/best-seller",
            Some(&admin),
            json!({ "vendor_id": vendor_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["kind"], "best_seller");
}

#[tokio::test]
async fn customers_have_no_vendor_inbox() {
    let app = TestApp::new().await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app.get("/api/vendor/notifications", Some(&asha)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Vendor access required");
}

#[tokio::test]
async fn admin_marks_a_single_notification_read() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    app.approved_vendor("meera@example.com", "Meera Greens").await;
    let admin = app.admin_token().await;

    let (status, unread) = app
        .get("/api/admin/notifications/unread-count", Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unread["data"]["count"], 2);

    let (_, inbox) = app.get("/api/admin/notifications", Some(&admin)).await;
    let id = inbox["data"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/api/admin/notifications/{id}/read"),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_read"], true);

    let (_, unread) = app
        .get("/api/admin/notifications/unread-count", Some(&admin))
        .await;
    assert_eq!(unread["data"]["count"], 1);

    // Admin notifications are not in the vendor inbox.
    let (status, body) = app
        .put(
            &format!("/api/vendor/notifications/{id}/read"),
            Some(&vendor),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Notification not found");
}
