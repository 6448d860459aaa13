use crate::{
    abstract_trait::CategoryRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateCategoryRequest, errors::RepositoryError, model::Category,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const CATEGORY_COLUMNS: &str = "id, name, slug, image_url, created_at";

#[derive(Clone)]
pub struct CategoryRepository {
    db: ConnectionPool,
}

impl CategoryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
        ))
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn create(&self, req: &CreateCategoryRequest) -> Result<Category, RepositoryError> {
        let slug = req.slug.trim().to_lowercase();

        let category = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (id, name, slug, image_url) VALUES ($1, $2, $3, $4) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.name.trim())
        .bind(&slug)
        .bind(req.image_url.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| match RepositoryError::from(e) {
            RepositoryError::AlreadyExists(_) => {
                RepositoryError::AlreadyExists(format!("Category slug '{slug}' already exists"))
            }
            other => {
                error!("❌ Failed to create category {slug}: {other:?}");
                other
            }
        })?;

        info!("✅ Created category {} ({})", category.name, category.slug);
        Ok(category)
    }
}
