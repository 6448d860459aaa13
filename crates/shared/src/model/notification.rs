use crate::model::{Audience, NotificationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub audience: Audience,
    pub vendor_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub extra_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
