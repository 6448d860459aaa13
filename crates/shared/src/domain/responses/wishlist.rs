use crate::model::{Product, WishlistItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct WishlistItemResponse {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub discounted_price: i64,
    pub image: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub in_stock: bool,
    pub added_at: DateTime<Utc>,
}

impl WishlistItemResponse {
    pub fn new(item: &WishlistItem, product: &Product) -> Self {
        Self {
            product_id: item.product_id,
            name: product.name.clone(),
            price: product.price,
            discounted_price: product.unit_price(),
            image: product.images.first().cloned(),
            rating: product.rating,
            review_count: product.review_count,
            in_stock: product.stock > 0,
            added_at: item.added_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct WishlistResponse {
    pub items: Vec<WishlistItemResponse>,
}
