use axum::{
    Extension, body::Body, http::Request, middleware::Next, response::IntoResponse,
};
use shared::{domain::Identity, errors::HttpError, model::Role};
use tracing::warn;

fn require(identity: &Identity, roles: &[Role], message: &str) -> Result<(), HttpError> {
    if identity.has_role(roles) {
        return Ok(());
    }

    warn!(
        "⚠️ {} ({}) denied: role {} not in {:?}",
        identity.email,
        identity.user_id,
        identity.role.as_str(),
        roles
    );
    Err(HttpError::Forbidden(message.to_string()))
}

/// Must run after `auth_middleware`.
pub async fn require_admin(
    Extension(identity): Extension<Identity>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    require(&identity, &[Role::Admin], "Admin access required")?;
    Ok(next.run(req).await)
}

pub async fn require_vendor(
    Extension(identity): Extension<Identity>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    require(&identity, &[Role::Vendor], "Vendor access required")?;
    Ok(next.run(req).await)
}
