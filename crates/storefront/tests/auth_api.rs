mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{PASSWORD, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn register_returns_created_user_without_password() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Asha", "email": "asha@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "asha@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_regardless_of_case() {
    let app = TestApp::new().await;
    app.customer("Asha", "asha@example.com").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Asha 2", "email": "ASHA@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn short_password_fails_validation() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Asha", "email": "asha@example.com", "password": "123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap_or_default();
    assert!(error.starts_with("Validation failed"), "{error}");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.customer("Asha", "asha@example.com").await;

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "asha@example.com", "password": "not-the-password" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_sets_http_only_token_cookie() {
    let app = TestApp::new().await;
    app.customer("Asha", "asha@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "asha@example.com", "password": PASSWORD }).to_string(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("token="), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
}

#[tokio::test]
async fn me_accepts_cookie_or_bearer_token() {
    let app = TestApp::new().await;
    let (token, user_id) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.as_str());

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/auth/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn refresh_issues_a_new_access_token() {
    let app = TestApp::new().await;
    app.customer("Asha", "asha@example.com").await;

    let (_, login) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "asha@example.com", "password": PASSWORD }),
        )
        .await;
    let refresh_token = login["data"]["refresh_token"].as_str().unwrap();

    let (status, body) = app
        .post(
            "/api/auth/refresh",
            None,
            json!({ "refresh_token": refresh_token }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["access_token"].as_str().unwrap();
    let (status, _) = app.get("/api/auth/me", Some(access)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn gate_redirects_anonymous_and_wrong_role() {
    let app = TestApp::new().await;
    let (token, _) = app.customer("Asha", "asha@example.com").await;

    let (status, body) = app.get("/api/auth/gate?path=/account", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["action"], "redirect");
    assert_eq!(body["data"]["location"], "/auth/signin");

    let (_, body) = app.get("/api/auth/gate?path=/admin", Some(&token)).await;
    assert_eq!(body["data"]["action"], "redirect");
    assert_eq!(body["data"]["location"], "/unauthorized");

    let (_, body) = app.get("/api/auth/gate?path=/account", Some(&token)).await;
    assert_eq!(body["data"]["action"], "allow");

    let admin = app.admin_token().await;
    let (_, body) = app.get("/api/auth/gate?path=/admin/vendors", Some(&admin)).await;
    assert_eq!(body["data"]["action"], "allow");
}

#[tokio::test]
async fn gate_treats_garbage_token_as_anonymous() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get("/api/auth/gate?path=/checkout", Some("not-a-jwt"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"], "/auth/signin");
}

#[tokio::test]
async fn logout_clears_the_token_cookie() {
    let app = TestApp::new().await;
    let (token, _) = app.customer("Asha", "asha@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("token=;"), "{cookie}");
    assert!(cookie.contains("Max-Age=0"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
}
