#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::{config::AdminBootstrap, di::Repositories};
use storefront::{handler::AppRouter, state::AppState};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@grocery.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const PASSWORD: &str = "secret123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Fresh in-memory app with a bootstrapped admin account.
    pub async fn new() -> Self {
        // Lowest bcrypt cost keeps hashing fast.
        let state = AppState::with_repositories(Repositories::memory(), "test-jwt-secret", 4);

        state
            .di_container
            .bootstrap_admin(&AdminBootstrap {
                email: ADMIN_EMAIL.to_string(),
                password: Some(ADMIN_PASSWORD.to_string()),
            })
            .await
            .expect("admin bootstrap");

        let router = AppRouter::build(state.clone());
        Self { router, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Registers and signs in a customer, returning `(token, user_id)`.
    pub async fn customer(&self, name: &str, email: &str) -> (String, String) {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({ "name": name, "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        let user_id = body["data"]["id"].as_str().expect("user id").to_string();
        (self.login(email, PASSWORD).await, user_id)
    }

    /// Customer who applied as `store_name` and was approved. Returns
    /// `(token, vendor_id)`.
    pub async fn approved_vendor(&self, email: &str, store_name: &str) -> (String, String) {
        let (token, _) = self.customer(store_name, email).await;

        let (status, body) = self
            .post(
                "/api/vendors",
                Some(&token),
                json!({
                    "store_name": store_name,
                    "contact_email": email,
                    "categories": ["fruits"]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "apply failed: {body}");
        let vendor_id = body["data"]["id"].as_str().expect("vendor id").to_string();

        let admin = self.admin_token().await;
        let (status, body) = self
            .put(
                "/api/vendors/approve",
                Some(&admin),
                json!({ "vendor_id": vendor_id, "status": "approved" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "approve failed: {body}");

        (token, vendor_id)
    }

    /// Product created by the vendor and approved by the admin.
    pub async fn approved_product(
        &self,
        vendor_token: &str,
        name: &str,
        price: i64,
        discount: i32,
        stock: i32,
    ) -> String {
        let (status, body) = self
            .post(
                "/api/products",
                Some(vendor_token),
                json!({
                    "name": name,
                    "price": price,
                    "discount": discount,
                    "category": "Fruits",
                    "stock": stock
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create product failed: {body}");
        let product_id = body["data"]["id"].as_str().expect("product id").to_string();

        let admin = self.admin_token().await;
        let (status, body) = self
            .put(
                &format!("/api/products/{product_id}/review"),
                Some(&admin),
                json!({ "status": "approved" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "approve product failed: {body}");

        product_id
    }
}

pub fn shipping_address() -> Value {
    json!({
        "street": "12 MG Road",
        "city": "Pune",
        "state": "Maharashtra",
        "zip_code": "411001"
    })
}
