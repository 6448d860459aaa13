mod common;

use axum::http::StatusCode;
use common::{TestApp, shipping_address};
use serde_json::json;

#[tokio::test]
async fn pending_products_stay_out_of_the_public_catalog() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;

    let (status, body) = app
        .post(
            "/api/products",
            Some(&vendor),
            json!({ "name": "Alphonso Mango", "price": 59900, "category": "Fruits", "stock": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let product_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, public) = app.get("/api/products", None).await;
    assert_eq!(public["pagination"]["total"], 0);

    let (_, mine) = app.get("/api/products/mine", Some(&vendor)).await;
    assert_eq!(mine["data"][0]["id"], product_id.as_str());

    let admin = app.admin_token().await;
    let (_, pending) = app.get("/api/products/pending", Some(&admin)).await;
    assert_eq!(pending["data"][0]["id"], product_id.as_str());

    app.put(
        &format!("/api/products/{product_id}/review"),
        Some(&admin),
        json!({ "status": "approved" }),
    )
    .await;

    let (_, public) = app.get("/api/products", None).await;
    assert_eq!(public["pagination"]["total"], 1);
    assert_eq!(public["data"][0]["name"], "Alphonso Mango");
}

#[tokio::test]
async fn customers_cannot_create_products() {
    let app = TestApp::new().await;
    let (token, _) = app.customer("Asha", "asha@example.com").await;

    let (status, _) = app
        .post(
            "/api/products",
            Some(&token),
            json!({ "name": "Tomato", "price": 4000, "category": "Vegetables", "stock": 5 }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn zero_price_fails_validation() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;

    let (status, body) = app
        .post(
            "/api/products",
            Some(&vendor),
            json!({ "name": "Tomato", "price": 0, "category": "Vegetables", "stock": 5 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Price must be between 1 and 1000000000 paise")
    );
}

#[tokio::test]
async fn vendors_only_manage_their_own_products() {
    let app = TestApp::new().await;
    let (ravi, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let (meera, _) = app.approved_vendor("meera@example.com", "Meera Greens").await;
    let product_id = app.approved_product(&ravi, "Spinach", 3000, 0, 20).await;

    let (status, body) = app
        .put(
            &format!("/api/products/{product_id}"),
            Some(&meera),
            json!({ "price": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You can only manage your own products");

    let (status, _) = app
        .delete(&format!("/api/products/{product_id}"), Some(&meera))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(
            &format!("/api/products/{product_id}"),
            Some(&ravi),
            json!({ "price": 3500 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 3500);
}

#[tokio::test]
async fn reviews_update_product_rating_once_per_customer() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let product_id = app.approved_product(&vendor, "Spinach", 3000, 0, 20).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    let review = json!({ "product_id": product_id, "rating": 4, "comment": "Fresh" });
    let (status, _) = app.post("/api/reviews", Some(&asha), review.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/reviews", Some(&asha), review).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, reviews) = app
        .get(&format!("/api/reviews?product_id={product_id}"), None)
        .await;
    assert_eq!(reviews["data"].as_array().unwrap().len(), 1);

    let (_, product) = app.get(&format!("/api/products/{product_id}"), None).await;
    assert_eq!(product["data"]["review_count"], 1);
}

#[tokio::test]
async fn duplicate_category_slug_conflicts() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let category = json!({ "name": "Fruits", "slug": "fruits" });
    let (status, _) = app.post("/api/categories", Some(&admin), category.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/categories", Some(&admin), category).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = app.get("/api/categories", None).await;
    assert_eq!(list["data"][0]["slug"], "fruits");
}

fn names(body: &serde_json::Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect()
}

#[tokio::test]
async fn catalog_sorts_filters_sale_items_and_searches() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let rice = app.approved_product(&vendor, "Basmati Rice", 5000, 0, 10).await;
    app.approved_product(&vendor, "Apple", 8000, 10, 10).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;

    for (product_id, rating) in [(&mango, 5), (&rice, 3)] {
        app.post(
            "/api/reviews",
            Some(&asha),
            json!({ "product_id": product_id, "rating": rating }),
        )
        .await;
    }

    let (_, body) = app.get("/api/products?sort=price-low", None).await;
    assert_eq!(names(&body), ["Basmati Rice", "Apple", "Mango"]);

    let (_, body) = app.get("/api/products?sort=price-high", None).await;
    assert_eq!(names(&body), ["Mango", "Apple", "Basmati Rice"]);

    let (_, body) = app.get("/api/products?sort=rating", None).await;
    assert_eq!(names(&body), ["Mango", "Basmati Rice", "Apple"]);

    let (_, body) = app.get("/api/products?filter=sale", None).await;
    assert_eq!(names(&body), ["Apple"]);

    let (_, body) = app.get("/api/products?search=RICE", None).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(names(&body), ["Basmati Rice"]);
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    app.approved_product(&vendor, "Mango", 10000, 0, 10).await;

    let (status, body) = app
        .get("/api/products?page=9223372036854775807&limit=100", None)
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn ordered_products_cannot_be_deleted() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let mango = app.approved_product(&vendor, "Mango", 10000, 0, 10).await;
    let rice = app.approved_product(&vendor, "Rice", 5000, 0, 10).await;
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

    let (status, body) = app
        .delete(&format!("/api/products/{mango}"), Some(&vendor))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Product has existing orders and cannot be deleted");

    let (status, _) = app
        .delete(&format!("/api/products/{rice}"), Some(&vendor))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/products/{rice}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_owner_edits_and_deletes_with_rating_recomputed() {
    let app = TestApp::new().await;
    let (vendor, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let product_id = app.approved_product(&vendor, "Spinach", 3000, 0, 20).await;
    let (asha, _) = app.customer("Asha", "asha@example.com").await;
    let (meera, _) = app.customer("Meera", "meera@example.com").await;
    let product_uri = format!("/api/products/{product_id}");

    let (_, body) = app
        .post(
            "/api/reviews",
            Some(&asha),
            json!({ "product_id": product_id, "rating": 2, "comment": "Wilted" }),
        )
        .await;
    let asha_review = format!("/api/reviews/{}", body["data"]["id"].as_str().unwrap());
    let (_, body) = app
        .post(
            "/api/reviews",
            Some(&meera),
            json!({ "product_id": product_id, "rating": 4 }),
        )
        .await;
    let meera_review = format!("/api/reviews/{}", body["data"]["id"].as_str().unwrap());

    let (_, product) = app.get(&product_uri, None).await;
    assert_eq!(product["data"]["rating"].as_f64(), Some(3.0));

    let (status, body) = app.get(&asha_review, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["comment"], "Wilted");

    let (status, body) = app
        .put(&asha_review, Some(&meera), json!({ "rating": 1 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, body) = app
        .put(
            &asha_review,
            Some(&asha),
            json!({ "rating": 5, "comment": "Better this week" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["rating"], 5);
    assert_eq!(body["data"]["comment"], "Better this week");

    let (_, product) = app.get(&product_uri, None).await;
    assert_eq!(product["data"]["rating"].as_f64(), Some(4.5));

    let (status, _) = app.delete(&meera_review, Some(&asha)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    let (status, _) = app.delete(&meera_review, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, product) = app.get(&product_uri, None).await;
    assert_eq!(product["data"]["rating"].as_f64(), Some(5.0));
    assert_eq!(product["data"]["review_count"], 1);

    let (status, _) = app.delete(&asha_review, Some(&asha)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&asha_review, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Review not found");

    let (_, product) = app.get(&product_uri, None).await;
    assert_eq!(product["data"]["rating"].as_f64(), Some(0.0));
    assert_eq!(product["data"]["review_count"], 0);
}
