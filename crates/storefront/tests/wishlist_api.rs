mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn new_customer_has_an_empty_wishlist() {
    let app = TestApp::new().await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app.get("/api/wishlist", Some(&asha)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn wishlist_requires_login() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/wishlist", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn adding_twice_keeps_one_entry() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 20, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app
        .post("/api/wishlist", Some(&asha), json!({ "product_id": mango }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Added to wishlist");

    let (status, body) = app
        .post("/api/wishlist", Some(&asha), json!({ "product_id": mango }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], mango.as_str());
    assert_eq!(items[0]["name"], "Mango");
    assert_eq!(items[0]["price"], 10000);
    assert_eq!(items[0]["discounted_price"], 8000);
    assert_eq!(items[0]["in_stock"], true);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let app = TestApp::new().await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app
        .post(
            "/api/wishlist",
            Some(&asha),
            json!({ "product_id": "00000000-0000-0000-0000-000000000001" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn removing_needs_a_product_id() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    for product_id in [&mango, &rice] {
        app.post("/api/wishlist", Some(&asha), json!({ "product_id": product_id }))
            .await;
    }

    let (status, body) = app.delete("/api/wishlist", Some(&asha)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Product ID is required");

    let (status, body) = app
        .delete(&format!("/api/wishlist?product_id={mango}"), Some(&asha))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Removed from wishlist");
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], rice.as_str());
}

#[tokio::test]
async fn wishlists_are_private_to_each_customer() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;
    let (meera, _) = app.customer("Meera", "meera@example.com").await;

    app.post("/api/wishlist", Some(&asha), json!({ "product_id": mango }))
        .await;

    let (_, body) = app.get("/api/wishlist", Some(&meera)).await;
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn deleted_products_leave_the_wishlist() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    app.post("/api/wishlist", Some(&asha), json!({ "product_id": mango }))
        .await;
    let (status, _) = app
        .delete(&format!("/api/products/{mango}"), Some(&vendor))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/wishlist", Some(&asha)).await;
    assert_eq!(body["data"]["items"], json!([]));
}
