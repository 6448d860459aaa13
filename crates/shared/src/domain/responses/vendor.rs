use crate::model::{Vendor, VendorStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VendorResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub store_name: String,
    pub store_description: Option<String>,
    pub contact_email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub categories: Vec<String>,
    pub status: VendorStatus,
    pub rejection_reason: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub commission: i32,
    pub rating: f64,
    pub review_count: i32,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vendor> for VendorResponse {
    fn from(value: Vendor) -> Self {
        VendorResponse {
            id: value.id,
            user_id: value.user_id,
            store_name: value.store_name,
            store_description: value.store_description,
            contact_email: value.contact_email,
            phone: value.phone,
            city: value.city,
            state: value.state,
            categories: value.categories,
            status: value.status,
            rejection_reason: value.rejection_reason,
            approved_at: value.approved_at,
            commission: value.commission,
            rating: value.rating,
            review_count: value.review_count,
            is_verified: value.is_verified,
            created_at: value.created_at,
        }
    }
}
