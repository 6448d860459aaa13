use crate::{
    domain::{
        Identity,
        requests::{BestSellerInviteRequest, CreateNotificationRecord, SendNotificationRequest},
        responses::{
            ApiResponse, DeliveryResponse, NotificationHistoryResponse, NotificationResponse,
            UnreadCountResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
    model::{Audience, Notification},
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynNotificationRepository = Arc<dyn NotificationRepositoryTrait + Send + Sync>;
pub type DynNotificationService = Arc<dyn NotificationServiceTrait + Send + Sync>;

/// Which inbox an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbox {
    Admin,
    Vendor(Uuid),
}

impl Inbox {
    pub fn contains(&self, notification: &Notification) -> bool {
        match self {
            Inbox::Admin => notification.audience == Audience::Admin,
            Inbox::Vendor(vendor_id) => {
                notification.audience == Audience::Vendor
                    && notification.vendor_id == Some(*vendor_id)
            }
        }
    }
}

#[async_trait]
pub trait NotificationRepositoryTrait {
    async fn create(&self, req: &CreateNotificationRecord)
    -> Result<Notification, RepositoryError>;
    async fn create_many(
        &self,
        reqs: &[CreateNotificationRecord],
    ) -> Result<usize, RepositoryError>;
    /// Newest first.
    async fn find_for_inbox(
        &self,
        inbox: Inbox,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError>;
    /// Every vendor-bound notification, newest first.
    async fn find_sent_to_vendors(&self, limit: i64)
    -> Result<Vec<Notification>, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, RepositoryError>;
    async fn count_unread(&self, inbox: Inbox) -> Result<i64, RepositoryError>;
    async fn mark_read(&self, id: Uuid) -> Result<Notification, RepositoryError>;
    async fn mark_all_read(&self, inbox: Inbox) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait NotificationServiceTrait {
    async fn vendor_inbox(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<Vec<NotificationResponse>>, ServiceError>;
    async fn vendor_unread_count(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError>;
    async fn vendor_mark_read(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError>;
    async fn vendor_mark_all_read(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError>;

    async fn send(
        &self,
        req: &SendNotificationRequest,
    ) -> Result<ApiResponse<DeliveryResponse>, ServiceError>;
    async fn invite_best_seller(
        &self,
        req: &BestSellerInviteRequest,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError>;
    async fn history(
        &self,
    ) -> Result<ApiResponse<Vec<NotificationHistoryResponse>>, ServiceError>;

    async fn admin_inbox(&self) -> Result<ApiResponse<Vec<NotificationResponse>>, ServiceError>;
    async fn admin_unread_count(&self)
    -> Result<ApiResponse<UnreadCountResponse>, ServiceError>;
    async fn admin_mark_read(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError>;
    async fn admin_mark_all_read(&self)
    -> Result<ApiResponse<UnreadCountResponse>, ServiceError>;
}
