use crate::{model::ProductStatus, utils::discounted_price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount: i32,
    pub category: String,
    pub images: Vec<String>,
    pub stock: i32,
    pub sku: Option<String>,
    #[sqlx(try_from = "String")]
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

impl Product {
    pub fn unit_price(&self) -> i64 {
        discounted_price(self.price, self.discount)
    }
}
