use crate::{
    abstract_trait::CategoryRepositoryTrait, domain::requests::CreateCategoryRequest,
    errors::RepositoryError, model::Category,
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::MemoryDatabase;

#[async_trait]
impl CategoryRepositoryTrait for MemoryDatabase {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn create(&self, req: &CreateCategoryRequest) -> Result<Category, RepositoryError> {
        let mut tables = self.tables.write().await;
        let slug = req.slug.trim().to_lowercase();

        if tables.categories.iter().any(|c| c.slug == slug) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Category slug '{slug}' already exists"
            )));
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            slug,
            image_url: req.image_url.clone(),
            created_at: Utc::now(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }
}
