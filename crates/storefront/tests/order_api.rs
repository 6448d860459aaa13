mod common;

use axum::http::StatusCode;
use common::{TestApp, shipping_address};
use serde_json::json;

#[tokio::test]
async fn order_totals_apply_discounts_and_reduce_stock() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 10, 5).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
    let (asha, user_id) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app
        .post(
            "/api/orders",
            Some(&asha),
            json!({
                "items": [
                    { "product_id": mango, "quantity": 2 },
                    { "product_id": rice, "quantity": 1 }
                ],
                "shipping_address": shipping_address(),
                "payment_method": "upi"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let order = &body["data"];
    assert_eq!(order["user_id"], user_id.as_str());
    assert_eq!(order["total_amount"], 25000);
    assert_eq!(order["discount_amount"], 2000);
    assert_eq!(order["tax_amount"], 0);
    assert_eq!(order["final_amount"], 23000);
    assert_eq!(order["order_status"], "pending");
    assert_eq!(order["items"].as_array().unwrap().len(), 2);

    let (_, product) = app.get(&format!("/api/products/{mango}"), None).await;
    assert_eq!(product["data"]["stock"], 3);
}

#[tokio::test]
async fn insufficient_stock_rejects_the_whole_order() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 2).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app
        .post(
            "/api/orders",
            Some(&asha),
            json!({
                "items": [
                    { "product_id": rice, "quantity": 1 },
                    { "product_id": mango, "quantity": 3 }
                ],
                "shipping_address": shipping_address(),
                "payment_method": "upi"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient stock for Mango");

    let (_, product) = app.get(&format!("/api/products/{rice}"), None).await;
    assert_eq!(product["data"]["stock"], 10);

    let (_, orders) = app.get("/api/orders", Some(&asha)).await;
    assert_eq!(orders["pagination"]["total"], 0);
}

#[tokio::test]
async fn empty_order_fails_validation() {
    let app = TestApp::new().await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, _) = app
        .post(
            "/api/orders",
            Some(&asha),
            json!({
                "items": [],
                "shipping_address": shipping_address(),
                "payment_method": "upi"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_visibility_and_status_updates() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 5).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;
    let (meera, _) = app.customer("Meera", "meera@example.com").await;

    let (_, body) = app
        .post(
            "/api/orders",
            Some(&asha),
            json!({
                "items": [{ "product_id": mango, "quantity": 1 }],
                "shipping_address": shipping_address(),
                "payment_method": "credit_card"
            }),
        )
        .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/orders/{order_id}");

    let (status, _) = app.get(&uri, Some(&meera)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(&uri, Some(&asha), json!({ "order_status": "delivered" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, vendor_orders) = app.get("/api/orders/vendor", Some(&vendor)).await;
    assert_eq!(vendor_orders["data"][0]["id"], order_id.as_str());

    let (status, body) = app
        .put(
            &uri,
            Some(&vendor),
            json!({ "order_status": "shipped", "tracking_number": "TRK-1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_status"], "shipped");
    assert_eq!(body["data"]["tracking_number"], "TRK-1");

    let (status, body) = app.get(&uri, Some(&asha)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_status"], "shipped");
}

#[tokio::test]
async fn suspended_vendor_can_no_longer_update_their_orders() {
    let app = TestApp::new().await;
    let (vendor, vendor_id) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 5).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (_, body) = app
        .post(
            "/api/orders",
            Some(&asha),
            json!({
                "items": [{ "product_id": mango, "quantity": 1 }],
                "shipping_address": shipping_address(),
                "payment_method": "upi"
            }),
        )
        .await;
    let uri = format!("/api/orders/{}", body["data"]["id"].as_str().unwrap());

    let admin = app.admin_token().await;
    let (status, body) = app
        .put(
            "/api/vendors/approve",
            Some(&admin),
            json!({ "vendor_id": vendor_id, "status": "suspended", "reason": "Late shipments" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, me) = app.get("/api/auth/me", Some(&vendor)).await;
    assert_eq!(me["data"]["role"], "vendor");

    let (status, body) = app
        .put(&uri, Some(&vendor), json!({ "order_status": "shipped" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, _) = app.get(&uri, Some(&vendor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(&uri, Some(&admin), json!({ "order_status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_status"], "confirmed");
}

#[tokio::test]
async fn admin_lists_every_order_by_status() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 5).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;
    let (meera, _) = app.customer("Meera", "meera@example.com").await;

    let mut order_ids = Vec::new();
    for token in [&asha, &meera] {
        let (_, body) = app
            .post(
                "/api/orders",
                Some(token),
                json!({
                    "items": [{ "product_id": mango, "quantity": 1 }],
                    "shipping_address": shipping_address(),
                    "payment_method": "upi"
                }),
            )
            .await;
        order_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let admin = app.admin_token().await;
    app.put(
        &format!("/api/orders/{}", order_ids[0]),
        Some(&admin),
        json!({ "order_status": "cancelled" }),
    )
    .await;

    let (status, all) = app.get("/api/orders/all", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["pagination"]["total"], 2);

    let (_, cancelled) = app
        .get("/api/orders/all?status=cancelled", Some(&admin))
        .await;
    assert_eq!(cancelled["pagination"]["total"], 1);
    assert_eq!(cancelled["data"][0]["id"], order_ids[0].as_str());

    let (status, _) = app.get("/api/orders/all", Some(&asha)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
