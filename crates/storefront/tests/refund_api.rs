mod common;

use axum::http::StatusCode;
use common::{TestApp, shipping_address};
use serde_json::json;

struct Shop {
    app: TestApp,
    vendor: String,
    asha: String,
    order_id: String,
}

/// One approved vendor and a customer holding a 23000 paise order.
async fn shop_with_order() -> Shop {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 10, 5).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

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
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    Shop {
        app,
        vendor,
        asha,
        order_id,
    }
}

async fn request_refund(shop: &Shop) -> String {
    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&shop.asha),
            json!({ "order_id": shop.order_id, "reason": "Mangoes arrived bruised" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn customer_requests_a_full_refund() {
    let shop = shop_with_order().await;

    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&shop.asha),
            json!({ "order_id": shop.order_id, "reason": "  Mangoes arrived bruised " }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Refund requested successfully");
    assert_eq!(body["data"]["status"], "requested");
    assert_eq!(body["data"]["amount"], 23000);
    assert_eq!(body["data"]["reason"], "Mangoes arrived bruised");

    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&shop.asha),
            json!({ "order_id": shop.order_id, "reason": "Again" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Refund request already exists for this order");

    let admin = shop.app.admin_token().await;
    let (_, inbox) = shop.app.get("/api/admin/notifications", Some(&admin)).await;
    assert!(
        inbox["data"]
            .as_array()
            .unwrap()
            .iter()
            .any(|n| n["title"] == "Refund requested")
    );
}

#[tokio::test]
async fn refund_rejects_foreign_orders_and_excess_amounts() {
    let shop = shop_with_order().await;
    let (meera, _) = shop.app.customer("Meera", "meera@example.com").await;

    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&meera),
            json!({ "order_id": shop.order_id, "reason": "Not mine" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found or does not belong to you");

    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&shop.asha),
            json!({ "order_id": shop.order_id, "amount": 23001, "reason": "Too much" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Refund amount cannot exceed the order total");

    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&shop.asha),
            json!({ "order_id": shop.order_id, "reason": "   " }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Reason is required");

    let (status, body) = shop
        .app
        .post(
            "/api/refunds",
            Some(&shop.asha),
            json!({ "order_id": shop.order_id, "amount": 9000, "reason": "One mango" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["amount"], 9000);
}

#[tokio::test]
async fn refund_lists_are_scoped_by_role() {
    let shop = shop_with_order().await;
    let refund_id = request_refund(&shop).await;
    let (meera, _) = shop.app.customer("Meera", "meera@example.com").await;
    let (other_vendor, _) = shop
        .app
        .approved_vendor("gopal@example.com", "Gopal Dairy")
        .await;
    let admin = shop.app.admin_token().await;

    for (token, expected) in [
        (&shop.asha, 1),
        (&shop.vendor, 1),
        (&admin, 1),
        (&meera, 0),
        (&other_vendor, 0),
    ] {
        let (status, body) = shop.app.get("/api/refunds", Some(token)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["pagination"]["total"], expected, "{body}");
    }

    let (_, body) = shop
        .app
        .get("/api/refunds?status=approved", Some(&admin))
        .await;
    assert_eq!(body["pagination"]["total"], 0);

    let uri = format!("/api/refunds/{refund_id}");
    let (status, _) = shop.app.get(&uri, Some(&shop.vendor)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = shop.app.get(&uri, Some(&meera)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = shop.app.get(&uri, Some(&other_vendor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_admin_decides_and_vendor_completes() {
    let shop = shop_with_order().await;
    let refund_id = request_refund(&shop).await;
    let uri = format!("/api/refunds/{refund_id}");
    let admin = shop.app.admin_token().await;

    let (status, body) = shop
        .app
        .put(&uri, Some(&shop.asha), json!({ "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only admins and vendors can update refunds");

    let (status, body) = shop
        .app
        .put(&uri, Some(&shop.vendor), json!({ "status": "approved" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only admin can approve/reject refunds");

    let (status, body) = shop
        .app
        .put(&uri, Some(&shop.vendor), json!({ "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot move refund from requested to completed");

    let (status, body) = shop
        .app
        .put(
            &uri,
            Some(&admin),
            json!({ "status": "approved", "admin_note": "Photos confirm damage" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["admin_note"], "Photos confirm damage");

    let order_uri = format!("/api/orders/{}", shop.order_id);
    let (_, order) = shop.app.get(&order_uri, Some(&shop.asha)).await;
    assert_eq!(order["data"]["payment_status"], "pending");

    let (status, body) = shop
        .app
        .put(&uri, Some(&shop.vendor), json!({ "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "completed");
    assert!(body["data"]["processed_at"].is_string());

    let (_, order) = shop.app.get(&order_uri, Some(&shop.asha)).await;
    assert_eq!(order["data"]["payment_status"], "refunded");

    let (status, body) = shop
        .app
        .put(&uri, Some(&admin), json!({ "status": "rejected" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot move refund from completed to rejected");
}

#[tokio::test]
async fn rejected_refund_leaves_payment_untouched() {
    let shop = shop_with_order().await;
    let refund_id = request_refund(&shop).await;
    let admin = shop.app.admin_token().await;

    let (status, body) = shop
        .app
        .put(
            &format!("/api/refunds/{refund_id}"),
            Some(&admin),
            json!({ "status": "rejected", "admin_note": "Outside the return window" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "rejected");

    let (_, order) = shop
        .app
        .get(&format!("/api/orders/{}", shop.order_id), Some(&shop.asha))
        .await;
    assert_eq!(order["data"]["payment_status"], "pending");

    let (status, _) = shop
        .app
        .put(
            &format!("/api/refunds/{refund_id}"),
            Some(&shop.vendor),
            json!({ "status": "completed" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
