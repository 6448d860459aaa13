use crate::model::{Product, ProductStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount: i32,
    pub discounted_price: i64,
    pub category: String,
    pub images: Vec<String>,
    pub stock: i32,
    pub sku: Option<String>,
    pub status: ProductStatus,
    pub rejection_reason: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rating: f64,
    pub review_count: i32,
    pub sales: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        let discounted_price = value.unit_price();
        ProductResponse {
            id: value.id,
            vendor_id: value.vendor_id,
            name: value.name,
            description: value.description,
            price: value.price,
            discount: value.discount,
            discounted_price,
            category: value.category,
            images: value.images,
            stock: value.stock,
            sku: value.sku,
            status: value.status,
            rejection_reason: value.rejection_reason,
            approved_at: value.approved_at,
            rating: value.rating,
            review_count: value.review_count,
            sales: value.sales,
            tags: value.tags,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
