use crate::model::ProductStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::default_page;

pub const DEFAULT_PRODUCT_PAGE_SIZE: i64 = 12;

fn default_product_limit() -> i64 {
    DEFAULT_PRODUCT_PAGE_SIZE
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    #[default]
    New,
    Popular,
    PriceLow,
    PriceHigh,
    Rating,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_product_limit")]
    pub limit: i64,

    pub category: Option<String>,

    /// `sale` keeps only discounted products.
    pub filter: Option<String>,

    pub search: Option<String>,

    pub vendor_id: Option<Uuid>,

    #[serde(default)]
    pub sort: ProductSort,
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_product_limit(),
            category: None,
            filter: None,
            search: None,
            vendor_id: None,
            sort: ProductSort::New,
        }
    }
}

/// Repository-level product query.
#[derive(Debug, Clone, Default)]
pub struct ProductListFilter {
    pub status: Option<ProductStatus>,
    pub only_approved_vendors: bool,
    pub category: Option<String>,
    pub on_sale: bool,
    pub search: Option<String>,
    pub vendor_id: Option<Uuid>,
    pub sort: ProductSort,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Required for admins; vendors always create under their own store.
    pub vendor_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Organic Basmati Rice 1kg")]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(
        min = 1,
        max = 1_000_000_000,
        message = "Price must be between 1 and 1000000000 paise"
    ))]
    #[schema(example = 18900)]
    pub price: i64,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: i32,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub sku: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(
        min = 1,
        max = 1_000_000_000,
        message = "Price must be between 1 and 1000000000 paise"
    ))]
    pub price: Option<i64>,

    #[validate(range(min = 0, max = 100, message = "Discount must be between 0 and 100"))]
    pub discount: Option<i32>,

    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,

    pub images: Option<Vec<String>>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    pub sku: Option<String>,

    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewProductRequest {
    pub status: ProductStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateProductRecord {
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount: i32,
    pub category: String,
    pub images: Vec<String>,
    pub stock: i32,
    pub sku: Option<String>,
    pub tags: Vec<String>,
}
