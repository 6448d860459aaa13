use crate::model::{Refund, RefundStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RefundResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub reason: String,
    pub status: RefundStatus,
    pub admin_note: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Refund> for RefundResponse {
    fn from(value: Refund) -> Self {
        RefundResponse {
            id: value.id,
            order_id: value.order_id,
            user_id: value.user_id,
            amount: value.amount,
            reason: value.reason,
            status: value.status,
            admin_note: value.admin_note,
            processed_at: value.processed_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
