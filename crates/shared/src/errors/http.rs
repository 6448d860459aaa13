use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized(ServiceError::InvalidCredentials.to_string())
            }

            ServiceError::Unauthorized(msg) => HttpError::Unauthorized(msg),
            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),
            ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            ServiceError::BadRequest(msg) => HttpError::BadRequest(msg),
            ServiceError::Conflict(msg) => HttpError::Conflict(msg),

            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {}", errors.join("; ")))
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                RepositoryError::AlreadyExists(msg) => {
                    HttpError::Conflict(format!("Already exists: {msg}"))
                }
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Foreign key violation: {msg}"))
                }
                other => HttpError::Internal(other.to_string()),
            },

            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::InvalidTokenType => HttpError::Unauthorized("Invalid token type".into()),

            ServiceError::Bcrypt(_) => HttpError::Internal("Internal authentication error".into()),

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let msg = match self {
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::Internal(msg) => msg,
        };

        if status.is_server_error() {
            error!("💥 Request failed with {status}: {msg}");
        }

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_status_codes() {
        let cases = [
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                ServiceError::Forbidden("no".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                ServiceError::NotFound("gone".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::Conflict("dup".into()),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Validation(vec!["name: required".into()]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Repo(RepositoryError::AlreadyExists("slug".into())),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Repo(RepositoryError::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ServiceError::TokenExpired, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn internal_errors_keep_their_message() {
        let err = HttpError::from(ServiceError::Internal("disk on fire".into()));
        assert!(matches!(err, HttpError::Internal(ref m) if m == "disk on fire"));
    }
}
