use crate::model::VendorStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{default_limit, default_page};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllVendors {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    pub status: Option<VendorStatus>,

    pub category: Option<String>,
}

impl Default for FindAllVendors {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            status: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateVendorRequest {
    #[validate(length(min = 2, message = "Store name must be at least 2 characters"))]
    #[schema(example = "Green Basket Organics")]
    pub store_name: String,

    pub store_description: Option<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: String,

    pub phone: Option<String>,

    pub city: Option<String>,

    pub state: Option<String>,

    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVendorProfileRequest {
    pub store_description: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Body of `PUT /api/vendors/approve`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewVendorRequest {
    pub vendor_id: Uuid,
    pub status: VendorStatus,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectVendorRequest {
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CreateVendorRecord {
    pub user_id: Uuid,
    pub store_name: String,
    pub store_description: Option<String>,
    pub contact_email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct VendorStatusUpdate {
    pub status: VendorStatus,
    pub rejection_reason: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
}
