use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartItemResponse {
    pub product_id: Uuid,
    pub vendor_id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
    pub quantity: i32,
    pub price: i64,
    pub line_total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub subtotal: i64,
}

impl CartResponse {
    pub fn new(items: Vec<CartItemResponse>) -> Self {
        let subtotal = items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.line_total));
        Self { items, subtotal }
    }
}
