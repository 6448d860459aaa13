use crate::model::{Audience, Notification, NotificationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const HISTORY_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub audience: Audience,
    pub vendor_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub extra_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        NotificationResponse {
            id: value.id,
            audience: value.audience,
            vendor_id: value.vendor_id,
            kind: value.kind,
            title: value.title,
            message: value.message,
            is_read: value.is_read,
            extra_data: value.extra_data,
            created_at: value.created_at,
        }
    }
}

/// Admin-facing row of the sent-notification log.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct NotificationHistoryResponse {
    pub id: Uuid,
    pub vendor_id: Option<Uuid>,
    pub vendor_name: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationHistoryResponse {
    pub fn new(notification: Notification, vendor_name: String) -> Self {
        NotificationHistoryResponse {
            id: notification.id,
            vendor_id: notification.vendor_id,
            vendor_name,
            kind: notification.kind,
            title: notification.title,
            message: truncate_preview(&notification.message),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

pub fn truncate_preview(message: &str) -> String {
    if message.chars().count() <= HISTORY_PREVIEW_CHARS {
        return message.to_string();
    }
    let head: String = message.chars().take(HISTORY_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy)]
pub struct DeliveryResponse {
    pub recipients: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_are_untouched() {
        assert_eq!(truncate_preview("Restock soon"), "Restock soon");
    }

    #[test]
    fn long_messages_are_cut_at_one_hundred_chars() {
        let message = "é".repeat(150);
        let preview = truncate_preview(&message);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 103);
    }
}
