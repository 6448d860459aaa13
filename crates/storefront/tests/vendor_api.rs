mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn application_starts_pending_and_approval_promotes_owner() {
    let app = TestApp::new().await;
    let (token, _) = app.customer("Ravi", "ravi@example.com").await;

    let (status, body) = app
        .post(
            "/api/vendors",
            Some(&token),
            json!({ "store_name": "Ravi Fresh", "contact_email": "ravi@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let vendor_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, public) = app.get("/api/vendors", None).await;
    assert_eq!(public["data"].as_array().unwrap().len(), 0);

    let admin = app.admin_token().await;
    let (_, pending) = app.get("/api/vendors/pending", Some(&admin)).await;
    assert_eq!(pending["data"][0]["id"], vendor_id.as_str());

    let (status, body) = app
        .put(
            "/api/vendors/approve",
            Some(&admin),
            json!({ "vendor_id": vendor_id, "status": "approved" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me["data"]["role"], "vendor");

    let (_, public) = app.get("/api/vendors", None).await;
    assert_eq!(public["data"][0]["store_name"], "Ravi Fresh");
}

#[tokio::test]
async fn second_application_from_same_user_conflicts() {
    let app = TestApp::new().await;
    let (token, _) = app.approved_vendor("ravi@example.com", "Ravi Fresh").await;

    let (status, body) = app
        .post(
            "/api/vendors",
            Some(&token),
            json!({ "store_name": "Another Store", "contact_email": "ravi@example.com" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "You already have a vendor profile");
}

#[tokio::test]
async fn store_names_are_unique_ignoring_case() {
    let app = TestApp::new().await;
    app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let (token, _) = app.customer("Meera", "meera@example.com").await;

    let (status, _) = app
        .post(
            "/api/vendors",
            Some(&token),
            json!({ "store_name": "RAVI FRESH", "contact_email": "meera@example.com" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn rejected_vendor_keeps_user_role() {
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
        .put(
            &format!("/api/vendors/{vendor_id}/reject"),
            Some(&admin),
            json!({ "reason": "Incomplete documents" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "rejected");

    let (_, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me["data"]["role"], "user");
}

#[tokio::test]
async fn admin_routes_reject_customers() {
    let app = TestApp::new().await;
    let (token, _) = app.customer("Ravi", "ravi@example.com").await;

    let (status, body) = app.get("/api/vendors/pending", Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admin access required");
}

#[tokio::test]
async fn admin_sees_vendors_in_every_status() {
    let app = TestApp::new().await;
    app.approved_vendor("ravi@example.com", "Ravi Fresh").await;
    let (token, _) = app.customer("Meera", "meera@example.com").await;
    app.post(
        "/api/vendors",
        Some(&token),
        json!({ "store_name": "Meera Greens", "contact_email": "meera@example.com" }),
    )
    .await;
    let admin = app.admin_token().await;

    let (_, public) = app.get("/api/vendors", None).await;
    assert_eq!(public["pagination"]["total"], 1);

    let (status, all) = app.get("/api/vendors/all", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["pagination"]["total"], 2);

    let (_, pending) = app.get("/api/vendors/all?status=pending", Some(&admin)).await;
    assert_eq!(pending["pagination"]["total"], 1);
    assert_eq!(pending["data"][0]["store_name"], "Meera Greens");

    let (status, _) = app.get("/api/vendors/all", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
