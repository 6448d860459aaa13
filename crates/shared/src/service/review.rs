use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, DynReviewRepository,
        ReviewServiceTrait,
    },
    domain::{
        Identity,
        requests::{
            CreateReviewRecord, CreateReviewRequest, FindAllReviews, UpdateReviewRequest,
            page_bounds,
        },
        responses::{ApiResponse, ApiResponsePagination, Pagination, ReviewResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Review,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;
use uuid::Uuid;

const ALREADY_REVIEWED: &str = "You have already reviewed this product";
const REVIEW_NOT_FOUND: &str = "Review not found";

/// Mean rating rounded to one decimal place.
pub(crate) fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let mean = sum as f64 / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}

pub struct ReviewService {
    reviews: DynReviewRepository,
    product_query: DynProductQueryRepository,
    product_command: DynProductCommandRepository,
    telemetry: ServiceTelemetry,
}

impl ReviewService {
    pub fn new(
        reviews: DynReviewRepository,
        product_query: DynProductQueryRepository,
        product_command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            reviews,
            product_query,
            product_command,
            telemetry: ServiceTelemetry::new("review-service", registry),
        }
    }

    async fn do_create(
        &self,
        actor: &Identity,
        req: &CreateReviewRequest,
    ) -> Result<Review, ServiceError> {
        let product = self
            .product_query
            .find_by_id(req.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

        if self
            .reviews
            .find_by_product_and_user(product.id, actor.user_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::BadRequest(ALREADY_REVIEWED.into()));
        }

        let record = CreateReviewRecord {
            product_id: product.id,
            user_id: actor.user_id,
            rating: req.rating,
            comment: req.comment.clone(),
        };

        let review = self
            .reviews
            .create(&record)
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists(_) => {
                    ServiceError::BadRequest(ALREADY_REVIEWED.into())
                }
                other => ServiceError::Repo(other),
            })?;

        self.refresh_rating(product.id).await?;
        Ok(review)
    }

    /// Recomputes the product's mean rating and review count.
    async fn refresh_rating(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let ratings = self.reviews.ratings_for_product(product_id).await?;
        let rating = average_rating(&ratings);
        self.product_command
            .update_rating(product_id, rating, ratings.len() as i32)
            .await?;

        info!("⭐ Product {product_id} now rated {rating} from {} reviews", ratings.len());
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Review, ServiceError> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(REVIEW_NOT_FOUND.into()))
    }

    async fn do_update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<Review, ServiceError> {
        let existing = self.load(id).await?;
        if existing.user_id != actor.user_id {
            return Err(ServiceError::Forbidden("Access denied".into()));
        }

        let review = self
            .reviews
            .update(id, req)
            .await
            .map_err(|e| ServiceError::not_found_or(e, REVIEW_NOT_FOUND))?;

        if req.rating.is_some() {
            self.refresh_rating(review.product_id).await?;
        }
        Ok(review)
    }

    async fn do_delete(&self, actor: &Identity, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.load(id).await?;
        if existing.user_id != actor.user_id && !actor.is_admin() {
            return Err(ServiceError::Forbidden("Access denied".into()));
        }

        self.reviews
            .delete(id)
            .await
            .map_err(|e| ServiceError::not_found_or(e, REVIEW_NOT_FOUND))?;

        self.refresh_rating(existing.product_id).await
    }
}

#[async_trait]
impl ReviewServiceTrait for ReviewService {
    async fn find_all(
        &self,
        req: &FindAllReviews,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError> {
        let (page, limit, _) = page_bounds(req.page, req.limit);

        let tracing_ctx = self
            .telemetry
            .start("find_all_reviews", vec![KeyValue::new("component", "review")]);

        let (reviews, total) = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Reviews fetched",
            self.reviews.find_all(req).await,
        )?;

        Ok(ApiResponsePagination::new(
            reviews.into_iter().map(ReviewResponse::from).collect(),
            Pagination::new(page, limit, total),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let review = self.load(id).await?;
        Ok(ApiResponse::success(ReviewResponse::from(review)))
    }

    async fn create(
        &self,
        actor: &Identity,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "create_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("product.id", req.product_id.to_string()),
                KeyValue::new("review.rating", i64::from(req.rating)),
            ],
        );

        let review = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Review created",
            self.do_create(actor, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Review submitted successfully",
            ReviewResponse::from(review),
        ))
    }

    async fn update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "update_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review.id", id.to_string()),
            ],
        );

        let review = self.telemetry.finish(
            &tracing_ctx,
            Method::Put,
            "Review updated",
            self.do_update(actor, id, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Review updated successfully",
            ReviewResponse::from(review),
        ))
    }

    async fn delete(&self, actor: &Identity, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "delete_review",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review.id", id.to_string()),
            ],
        );

        self.telemetry.finish(
            &tracing_ctx,
            Method::Delete,
            "Review deleted",
            self.do_delete(actor, id).await,
        )?;

        Ok(ApiResponse::with_message("Review deleted successfully", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[5]), 5.0);
        assert_eq!(average_rating(&[4, 5, 5]), 4.7);
        assert_eq!(average_rating(&[1, 2]), 1.5);
    }
}
