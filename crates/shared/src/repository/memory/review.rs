use crate::{
    abstract_trait::ReviewRepositoryTrait,
    domain::requests::{
        CreateReviewRecord, FindAllReviews, ReviewSortField, SortOrder, UpdateReviewRequest,
        page_bounds,
    },
    errors::RepositoryError,
    model::Review,
};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use uuid::Uuid;

use super::{MemoryDatabase, newest_first, page};

#[async_trait]
impl ReviewRepositoryTrait for MemoryDatabase {
    async fn find_all(&self, req: &FindAllReviews) -> Result<(Vec<Review>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let tables = self.tables.read().await;

        let mut matched = newest_first(
            tables
                .reviews
                .iter()
                .filter(|r| req.product_id.is_none_or(|id| r.product_id == id))
                .filter(|r| req.user_id.is_none_or(|id| r.user_id == id))
                .filter(|r| req.rating.is_none_or(|rating| r.rating == rating))
                .cloned(),
            |r| r.created_at,
        );

        match (req.sort_by, req.sort_order) {
            (ReviewSortField::CreatedAt, SortOrder::Desc) => {}
            (ReviewSortField::CreatedAt, SortOrder::Asc) => matched.reverse(),
            (ReviewSortField::Rating, SortOrder::Desc) => {
                matched.sort_by_key(|r| Reverse(r.rating))
            }
            (ReviewSortField::Rating, SortOrder::Asc) => matched.sort_by_key(|r| r.rating),
        }

        let total = matched.len() as i64;
        Ok((page(matched, limit, offset), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_product_and_user(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .find(|r| r.product_id == product_id && r.user_id == user_id)
            .cloned())
    }

    async fn create(&self, req: &CreateReviewRecord) -> Result<Review, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables
            .reviews
            .iter()
            .any(|r| r.product_id == req.product_id && r.user_id == req.user_id)
        {
            return Err(RepositoryError::AlreadyExists(
                "reviews_product_id_user_id_key".into(),
            ));
        }

        let review = Review {
            id: Uuid::new_v4(),
            product_id: req.product_id,
            user_id: req.user_id,
            rating: req.rating,
            comment: req.comment.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<Review, RepositoryError> {
        let mut tables = self.tables.write().await;
        let review = tables
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(rating) = req.rating {
            review.rating = rating;
        }
        if let Some(comment) = &req.comment {
            review.comment = Some(comment.clone());
        }
        Ok(review.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.reviews.len();
        tables.reviews.retain(|r| r.id != id);

        if tables.reviews.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ratings_for_product(&self, product_id: Uuid) -> Result<Vec<i32>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.rating)
            .collect())
    }
}
