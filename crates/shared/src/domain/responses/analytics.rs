use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq)]
pub struct AdminTotals {
    pub users: i64,
    pub vendors: i64,
    pub products: i64,
    pub orders: i64,
    pub sales: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq)]
pub struct AdminRecent {
    pub sales: i64,
    pub orders: i64,
    pub user_growth: i64,
    pub vendor_growth: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TopVendor {
    pub vendor_id: Uuid,
    pub store_name: String,
    pub sales: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TopProduct {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub revenue: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminAnalyticsResponse {
    pub totals: AdminTotals,
    pub recent: AdminRecent,
    pub top_vendors: Vec<TopVendor>,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq)]
pub struct VendorTotals {
    pub products: i64,
    pub orders: i64,
    pub sales: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    pub sales: i64,
    pub orders: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VendorAnalyticsResponse {
    pub totals: VendorTotals,
    pub recent: PeriodSummary,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq)]
pub struct UserTotals {
    pub orders: i64,
    pub spent: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct FavoriteCategory {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserAnalyticsResponse {
    pub totals: UserTotals,
    pub recent: UserTotals,
    pub favorite_categories: Vec<FavoriteCategory>,
}
