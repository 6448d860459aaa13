use crate::{
    abstract_trait::ReviewRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{
        CreateReviewRecord, FindAllReviews, ReviewSortField, SortOrder, UpdateReviewRequest,
        page_bounds,
    },
    errors::RepositoryError,
    model::Review,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const REVIEW_COLUMNS: &str = "id, product_id, user_id, rating, comment, created_at";

fn order_clause(sort_by: ReviewSortField, sort_order: SortOrder) -> &'static str {
    match (sort_by, sort_order) {
        (ReviewSortField::CreatedAt, SortOrder::Desc) => "created_at DESC, id",
        (ReviewSortField::CreatedAt, SortOrder::Asc) => "created_at ASC, id",
        (ReviewSortField::Rating, SortOrder::Desc) => "rating DESC, created_at DESC, id",
        (ReviewSortField::Rating, SortOrder::Asc) => "rating ASC, created_at DESC, id",
    }
}

#[derive(Clone)]
pub struct ReviewRepository {
    db: ConnectionPool,
}

impl ReviewRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepositoryTrait for ReviewRepository {
    async fn find_all(&self, req: &FindAllReviews) -> Result<(Vec<Review>, i64), RepositoryError> {
        info!(
            "🔍 Fetching reviews product={:?} user={:?} rating={:?}",
            req.product_id, req.user_id, req.rating
        );

        let (_, limit, offset) = page_bounds(req.page, req.limit);

        const FILTER: &str = "($1::UUID IS NULL OR product_id = $1) \
             AND ($2::UUID IS NULL OR user_id = $2) \
             AND ($3::INT IS NULL OR rating = $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM reviews WHERE {FILTER}"))
                .bind(req.product_id)
                .bind(req.user_id)
                .bind(req.rating)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    error!("❌ Failed to count reviews: {e:?}");
                    RepositoryError::from(e)
                })?;

        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE {FILTER} \
             ORDER BY {} LIMIT $4 OFFSET $5",
            order_clause(req.sort_by, req.sort_order)
        ))
        .bind(req.product_id)
        .bind(req.user_id)
        .bind(req.rating)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch reviews: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok((reviews, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError> {
        sqlx::query_as::<_, Review>(&format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_product_and_user(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Review>, RepositoryError> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE product_id = $1 AND user_id = $2"
        ))
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create(&self, req: &CreateReviewRecord) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (id, product_id, user_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.product_id)
        .bind(req.user_id)
        .bind(req.rating)
        .bind(req.comment.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create review for {}: {e:?}", req.product_id);
            RepositoryError::from(e)
        })?;

        info!("✅ Review {} ({}★) on product {}", review.id, review.rating, review.product_id);
        Ok(review)
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<Review, RepositoryError> {
        sqlx::query_as::<_, Review>(&format!(
            "UPDATE reviews SET rating = COALESCE($2, rating), comment = COALESCE($3, comment)              WHERE id = $1 RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(req.rating)
        .bind(req.comment.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update review {id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete review {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted review {id}");
        Ok(())
    }

    async fn ratings_for_product(&self, product_id: Uuid) -> Result<Vec<i32>, RepositoryError> {
        sqlx::query_scalar("SELECT rating FROM reviews WHERE product_id = $1")
            .bind(product_id)
            .fetch_all(&self.db)
            .await
            .map_err(RepositoryError::from)
    }
}
