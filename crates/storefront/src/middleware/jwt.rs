use axum::{
    Extension,
    body::Body,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynAuthService, domain::Identity, errors::HttpError};
use tracing::debug;

pub const TOKEN_COOKIE: &str = "token";

/// Cookie `token` first, then `Authorization: Bearer`.
pub fn extract_token(cookie_jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    cookie_jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty())
        })
}

/// Rejects the request unless it carries a valid access token for an active
/// user, then exposes the caller as `Extension<Identity>`.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(auth): Extension<DynAuthService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = extract_token(&cookie_jar, req.headers()).ok_or_else(|| {
        HttpError::Unauthorized("You are not logged in, please provide token".to_string())
    })?;

    let identity = auth.identify(&token).await?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Like [`auth_middleware`] but never rejects: a missing or bad token yields
/// `Extension<Option<Identity>>` holding `None`.
pub async fn optional_auth_middleware(
    cookie_jar: CookieJar,
    Extension(auth): Extension<DynAuthService>,
    mut req: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let identity: Option<Identity> = match extract_token(&cookie_jar, req.headers()) {
        Some(token) => match auth.identify(&token).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("Ignoring unusable token: {e}");
                None
            }
        },
        None => None,
    };

    req.extensions_mut().insert(identity);

    next.run(req).await
}
