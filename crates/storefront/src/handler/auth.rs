use crate::{
    gate::{GateDecision, RouteGate},
    middleware::{
        jwt::{TOKEN_COOKIE, auth_middleware, optional_auth_middleware},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use shared::{
    abstract_trait::DynAuthService,
    domain::{
        Identity,
        requests::{LoginRequest, RefreshTokenRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GateQuery {
    /// Page path to evaluate, e.g. `/admin/vendors`.
    pub path: String,
}

fn token_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register_user_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, sets the token cookie", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Incorrect email or password"),
        (status = 403, description = "Account blocked")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    Extension(service): Extension<DynAuthService>,
    cookie_jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    let cookie_jar = cookie_jar.add(token_cookie(response.data.access_token.clone()));
    Ok((StatusCode::OK, cookie_jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh_token_handler(
    Extension(service): Extension<DynAuthService>,
    cookie_jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.refresh(&body.refresh_token).await?;
    let cookie_jar = cookie_jar.add(token_cookie(response.data.access_token.clone()));
    Ok((StatusCode::OK, cookie_jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Token cookie cleared")
    ),
    tag = "Auth"
)]
pub async fn logout_handler(cookie_jar: CookieJar) -> impl IntoResponse {
    let cookie_jar = cookie_jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    (
        StatusCode::OK,
        cookie_jar,
        Json(ApiResponse::with_message(
            "Logged out successfully",
            serde_json::Value::Null,
        )),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not logged in")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth",
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.me(&identity).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/auth/gate",
    params(GateQuery),
    responses(
        (status = 200, description = "Whether the page may be shown", body = ApiResponse<GateDecision>)
    ),
    tag = "Auth",
)]
pub async fn gate_handler(
    Extension(identity): Extension<Option<Identity>>,
    Query(query): Query<GateQuery>,
) -> impl IntoResponse {
    let decision = RouteGate::decide(&query.path, identity.map(|i| i.role));
    (StatusCode::OK, Json(ApiResponse::success(decision)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let auth_service = app_state.di_container.auth_service.clone();

    let public_routes = OpenApiRouter::new()
        .route("/api/auth/register", post(register_user_handler))
        .route("/api/auth/login", post(login_user_handler))
        .route("/api/auth/refresh", post(refresh_token_handler))
        .route("/api/auth/logout", post(logout_handler))
        .layer(Extension(auth_service.clone()));

    let gate_routes = OpenApiRouter::new()
        .route("/api/auth/gate", get(gate_handler))
        .route_layer(middleware::from_fn(optional_auth_middleware))
        .layer(Extension(auth_service.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/auth/me", get(get_me_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(auth_service));

    public_routes.merge(gate_routes).merge(private_routes)
}
