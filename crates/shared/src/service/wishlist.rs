use crate::{
    abstract_trait::{DynProductQueryRepository, DynWishlistRepository, WishlistServiceTrait},
    domain::{
        Identity,
        requests::{AddWishlistItemRequest, RemoveWishlistItemQuery},
        responses::{ApiResponse, WishlistItemResponse, WishlistResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

const PRODUCT_NOT_FOUND: &str = "Product not found";

pub struct WishlistService {
    wishlist: DynWishlistRepository,
    product_query: DynProductQueryRepository,
    telemetry: ServiceTelemetry,
}

impl WishlistService {
    pub fn new(
        wishlist: DynWishlistRepository,
        product_query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            wishlist,
            product_query,
            telemetry: ServiceTelemetry::new("wishlist-service", registry),
        }
    }

    /// Saved items joined with their products. Entries whose product is gone
    /// are skipped.
    async fn snapshot(&self, user_id: Uuid) -> Result<WishlistResponse, ServiceError> {
        let saved = self.wishlist.find_by_user(user_id).await?;
        if saved.is_empty() {
            return Ok(WishlistResponse::default());
        }

        let ids: Vec<Uuid> = saved.iter().map(|w| w.product_id).collect();
        let products: HashMap<Uuid, Product> = self
            .product_query
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let items = saved
            .iter()
            .filter_map(|item| {
                products
                    .get(&item.product_id)
                    .map(|product| WishlistItemResponse::new(item, product))
            })
            .collect();

        Ok(WishlistResponse { items })
    }

    async fn do_add(
        &self,
        actor: &Identity,
        req: &AddWishlistItemRequest,
    ) -> Result<WishlistResponse, ServiceError> {
        let product = self
            .product_query
            .find_by_id(req.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))?;

        self.wishlist
            .add_item(actor.user_id, product.id)
            .await
            .map_err(|err| match err {
                RepositoryError::ForeignKey(_) => ServiceError::NotFound(PRODUCT_NOT_FOUND.into()),
                other => ServiceError::Repo(other),
            })?;

        info!("💚 {} saved {} to their wishlist", actor.email, product.name);
        self.snapshot(actor.user_id).await
    }
}

#[async_trait]
impl WishlistServiceTrait for WishlistService {
    async fn get(&self, actor: &Identity) -> Result<ApiResponse<WishlistResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "get_wishlist",
            vec![
                KeyValue::new("component", "wishlist"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let wishlist = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Wishlist fetched",
            self.snapshot(actor.user_id).await,
        )?;

        Ok(ApiResponse::success(wishlist))
    }

    async fn add(
        &self,
        actor: &Identity,
        req: &AddWishlistItemRequest,
    ) -> Result<ApiResponse<WishlistResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "add_to_wishlist",
            vec![
                KeyValue::new("component", "wishlist"),
                KeyValue::new("product.id", req.product_id.to_string()),
            ],
        );

        let wishlist = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Wishlist item added",
            self.do_add(actor, req).await,
        )?;

        Ok(ApiResponse::with_message("Added to wishlist", wishlist))
    }

    async fn remove(
        &self,
        actor: &Identity,
        req: &RemoveWishlistItemQuery,
    ) -> Result<ApiResponse<WishlistResponse>, ServiceError> {
        let product_id = req
            .product_id
            .ok_or_else(|| ServiceError::BadRequest("Product ID is required".into()))?;

        let tracing_ctx = self.telemetry.start(
            "remove_from_wishlist",
            vec![
                KeyValue::new("component", "wishlist"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let result = async {
            self.wishlist.remove_item(actor.user_id, product_id).await?;
            self.snapshot(actor.user_id).await
        }
        .await;

        let wishlist = self.telemetry.finish(
            &tracing_ctx,
            Method::Delete,
            "Wishlist item removed",
            result,
        )?;

        Ok(ApiResponse::with_message("Removed from wishlist", wishlist))
    }
}
