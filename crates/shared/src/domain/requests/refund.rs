use crate::model::RefundStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::{default_limit, default_page};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllRefunds {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    pub status: Option<RefundStatus>,

    pub order_id: Option<Uuid>,
}

impl Default for FindAllRefunds {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            status: None,
            order_id: None,
        }
    }
}

/// Which refunds a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundScope {
    All,
    /// Refunds the customer requested.
    User(Uuid),
    /// Refunds on orders holding at least one line from the vendor.
    Vendor(Uuid),
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRefundRequest {
    pub order_id: Uuid,

    /// Paise. Defaults to the order's final amount.
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: Option<i64>,

    #[validate(length(min = 1, max = 1000, message = "Reason must be 1 to 1000 characters"))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRefundRequest {
    pub status: RefundStatus,

    #[validate(length(max = 1000, message = "Note is too long"))]
    pub admin_note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateRefundRecord {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub reason: String,
}
