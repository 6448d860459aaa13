use crate::{
    abstract_trait::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::{CreateUserRecord, FindAllUsers, UpdateProfileRequest, page_bounds},
    errors::RepositoryError,
    model::{Role, User},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use super::like_pattern;

const USER_COLUMNS: &str = "id, name, email, password, role, phone, is_email_verified, \
                            is_blocked, last_login, created_at, updated_at";

#[derive(Clone)]
pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<User>, i64), RepositoryError> {
        info!("🔍 Fetching users role={:?} search={:?}", req.role, req.search);

        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let role = req.role.map(|r| r.as_str());
        let pattern = like_pattern(req.search.as_deref());

        const FILTER: &str = "($1::TEXT IS NULL OR role = $1) \
             AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users WHERE {FILTER}"))
            .bind(role)
            .bind(pattern.as_deref())
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count users: {e:?}");
                RepositoryError::from(e)
            })?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {FILTER} \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(role)
        .bind(pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch users: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok((users, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch user by email: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }
}

#[derive(Clone)]
pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, email, password, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(req.email.to_lowercase())
        .bind(&req.password_hash)
        .bind(req.role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user {}: {e:?}", req.email);
            RepositoryError::from(e)
        })?;

        info!("✅ Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = COALESCE($2, name), phone = COALESCE($3, phone), \
             updated_at = now() WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.phone.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update user {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2, updated_at = now() WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to change role of user {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🔄 User {id} is now {role}");
        Ok(user)
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_blocked = $2, updated_at = now() WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(blocked)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete user {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted user {id}");
        Ok(())
    }
}
