mod common;

use axum::http::StatusCode;
use common::{TestApp, shipping_address};
use serde_json::json;

#[tokio::test]
async fn new_customer_has_an_empty_cart() {
    let app = TestApp::new().await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app.get("/api/cart", Some(&asha)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["subtotal"], 0);
}

#[tokio::test]
async fn adding_the_same_product_merges_quantities() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 20, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    app.post("/api/cart", Some(&asha), json!({ "product_id": mango }))
        .await;
    let (status, body) = app
        .post("/api/cart", Some(&asha), json!({ "product_id": mango, "quantity": 2 }))
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["price"], 8000);
    assert_eq!(body["data"]["subtotal"], 24000);
}

#[tokio::test]
async fn zero_quantity_update_removes_the_line() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    app.post("/api/cart", Some(&asha), json!({ "product_id": mango }))
        .await;
    app.post("/api/cart", Some(&asha), json!({ "product_id": rice }))
        .await;

    let (_, body) = app
        .put("/api/cart", Some(&asha), json!({ "product_id": mango, "quantity": 0 }))
        .await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["subtotal"], 5000);

    let (status, body) = app.delete("/api/cart", Some(&asha)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn checkout_places_order_and_empties_cart() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    app.post("/api/cart", Some(&asha), json!({ "product_id": mango, "quantity": 2 }))
        .await;

    let (status, body) = app
        .post(
            "/api/orders/checkout",
            Some(&asha),
            json!({ "shipping_address": shipping_address(), "payment_method": "wallet" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["final_amount"], 20000);

    let (_, cart) = app.get("/api/cart", Some(&asha)).await;
    assert_eq!(cart["data"]["items"], json!([]));

    let (status, body) = app
        .post(
            "/api/orders/checkout",
            Some(&asha),
            json!({ "shipping_address": shipping_address(), "payment_method": "wallet" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cart is empty");
}

#[tokio::test]
async fn adding_more_than_stock_is_rejected() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 3).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    app.post("/api/cart", Some(&asha), json!({ "product_id": mango, "quantity": 2 }))
        .await;
    let (status, body) = app
        .post("/api/cart", Some(&asha), json!({ "product_id": mango, "quantity": 2 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient stock");

    let (_, cart) = app.get("/api/cart", Some(&asha)).await;
    assert_eq!(cart["data"]["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn updating_a_line_not_in_the_cart_is_not_found() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 3).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app
        .put("/api/cart", Some(&asha), json!({ "product_id": mango, "quantity": 1 }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found in cart");
}
