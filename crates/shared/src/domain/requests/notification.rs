use crate::model::{Audience, NotificationKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendNotificationRequest {
    /// Omit to broadcast to every approved vendor.
    pub vendor_id: Option<Uuid>,

    #[serde(default)]
    pub kind: NotificationKind,

    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    pub extra_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BestSellerInviteRequest {
    pub vendor_id: Uuid,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationRecord {
    pub audience: Audience,
    pub vendor_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub extra_data: Option<serde_json::Value>,
}

impl CreateNotificationRecord {
    pub fn for_vendor(
        vendor_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            audience: Audience::Vendor,
            vendor_id: Some(vendor_id),
            kind,
            title: title.into(),
            message: message.into(),
            extra_data: None,
        }
    }

    pub fn for_admin(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            audience: Audience::Admin,
            vendor_id: None,
            kind,
            title: title.into(),
            message: message.into(),
            extra_data: None,
        }
    }

    pub fn with_extra(mut self, extra_data: serde_json::Value) -> Self {
        self.extra_data = Some(extra_data);
        self
    }
}
