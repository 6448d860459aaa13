use sqlx::Error as SqlxError;
use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::RowNotFound = err {
            return RepositoryError::NotFound;
        }

        if let Some(db_err) = err.as_database_error() {
            let detail = db_err
                .constraint()
                .map(str::to_string)
                .unwrap_or_else(|| db_err.message().to_string());

            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return RepositoryError::AlreadyExists(detail),
                Some(FOREIGN_KEY_VIOLATION) => return RepositoryError::ForeignKey(detail),
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_matches!(
            RepositoryError::from(SqlxError::RowNotFound),
            RepositoryError::NotFound
        );
    }

    #[test]
    fn other_sqlx_errors_are_wrapped() {
        assert_matches!(
            RepositoryError::from(SqlxError::PoolTimedOut),
            RepositoryError::Sqlx(_)
        );
    }
}
