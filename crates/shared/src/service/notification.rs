use crate::{
    abstract_trait::{
        DynNotificationRepository, DynVendorQueryRepository, Inbox, NotificationServiceTrait,
    },
    domain::{
        Identity,
        requests::{BestSellerInviteRequest, CreateNotificationRecord, SendNotificationRequest},
        responses::{
            ApiResponse, DeliveryResponse, NotificationHistoryResponse, NotificationResponse,
            UnreadCountResponse,
        },
    },
    errors::ServiceError,
    model::{NotificationKind, Vendor, VendorStatus},
    service::vendor::approved_vendor_of,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

pub const INBOX_LIMIT: i64 = 100;
pub const HISTORY_LIMIT: i64 = 100;

const NOTIFICATION_NOT_FOUND: &str = "Notification not found";
const UNKNOWN_VENDOR: &str = "Unknown vendor";
const BEST_SELLER_TITLE: &str = "Best Seller Program Invitation";

fn best_seller_message(vendor: &Vendor) -> String {
    format!(
        "Congratulations {}! Your store has been selected for our Best Seller program. \
         Enjoy featured placement and priority support.",
        vendor.store_name
    )
}

pub struct NotificationService {
    notifications: DynNotificationRepository,
    vendor_query: DynVendorQueryRepository,
    telemetry: ServiceTelemetry,
}

impl NotificationService {
    pub fn new(
        notifications: DynNotificationRepository,
        vendor_query: DynVendorQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            notifications,
            vendor_query,
            telemetry: ServiceTelemetry::new("notification-service", registry),
        }
    }

    async fn vendor_inbox_of(&self, actor: &Identity) -> Result<Inbox, ServiceError> {
        let vendor = approved_vendor_of(&self.vendor_query, actor).await?;
        Ok(Inbox::Vendor(vendor.id))
    }

    async fn list(&self, inbox: Inbox) -> Result<Vec<NotificationResponse>, ServiceError> {
        let notifications = self.notifications.find_for_inbox(inbox, INBOX_LIMIT).await?;
        Ok(notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect())
    }

    async fn unread(&self, inbox: Inbox) -> Result<UnreadCountResponse, ServiceError> {
        Ok(UnreadCountResponse {
            count: self.notifications.count_unread(inbox).await?,
        })
    }

    /// Marks one notification read if it belongs to `inbox`.
    async fn mark_read_in(
        &self,
        inbox: Inbox,
        id: Uuid,
    ) -> Result<NotificationResponse, ServiceError> {
        let owned = self
            .notifications
            .find_by_id(id)
            .await?
            .filter(|n| inbox.contains(n))
            .ok_or_else(|| ServiceError::NotFound(NOTIFICATION_NOT_FOUND.into()))?;

        let updated = self
            .notifications
            .mark_read(owned.id)
            .await
            .map_err(|e| ServiceError::not_found_or(e, NOTIFICATION_NOT_FOUND))?;

        Ok(NotificationResponse::from(updated))
    }

    async fn mark_all_in(&self, inbox: Inbox) -> Result<UnreadCountResponse, ServiceError> {
        let marked = self.notifications.mark_all_read(inbox).await?;
        info!("📭 {marked} notifications marked read for {inbox:?}");
        Ok(UnreadCountResponse {
            count: marked as i64,
        })
    }

    async fn do_send(&self, req: &SendNotificationRequest) -> Result<usize, ServiceError> {
        let targets: Vec<Vendor> = match req.vendor_id {
            Some(vendor_id) => vec![
                self.vendor_query
                    .find_by_id(vendor_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Vendor not found".into()))?,
            ],
            None => self.vendor_query.find_by_status(VendorStatus::Approved).await?,
        };

        let records: Vec<CreateNotificationRecord> = targets
            .iter()
            .map(|vendor| {
                let record = CreateNotificationRecord::for_vendor(
                    vendor.id,
                    req.kind,
                    req.title.clone(),
                    req.message.clone(),
                );
                match &req.extra_data {
                    Some(extra) => record.with_extra(extra.clone()),
                    None => record,
                }
            })
            .collect();

        if records.is_empty() {
            return Ok(0);
        }

        Ok(self.notifications.create_many(&records).await?)
    }

    async fn do_invite(
        &self,
        req: &BestSellerInviteRequest,
    ) -> Result<NotificationResponse, ServiceError> {
        let vendor = self
            .vendor_query
            .find_by_id(req.vendor_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Vendor not found".into()))?;

        if vendor.status != VendorStatus::Approved {
            return Err(ServiceError::BadRequest(
                "Only approved vendors can be invited".into(),
            ));
        }

        let message = req
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| best_seller_message(&vendor));

        let notification = self
            .notifications
            .create(
                &CreateNotificationRecord::for_vendor(
                    vendor.id,
                    NotificationKind::BestSeller,
                    BEST_SELLER_TITLE,
                    message,
                )
                .with_extra(json!({ "program": "best_seller", "store_name": vendor.store_name })),
            )
            .await?;

        Ok(NotificationResponse::from(notification))
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn vendor_inbox(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<Vec<NotificationResponse>>, ServiceError> {
        let inbox = self.vendor_inbox_of(actor).await?;
        Ok(ApiResponse::success(self.list(inbox).await?))
    }

    async fn vendor_unread_count(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError> {
        let inbox = self.vendor_inbox_of(actor).await?;
        Ok(ApiResponse::success(self.unread(inbox).await?))
    }

    async fn vendor_mark_read(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        let inbox = self.vendor_inbox_of(actor).await?;
        Ok(ApiResponse::with_message(
            "Notification marked as read",
            self.mark_read_in(inbox, id).await?,
        ))
    }

    async fn vendor_mark_all_read(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError> {
        let inbox = self.vendor_inbox_of(actor).await?;
        Ok(ApiResponse::with_message(
            "All notifications marked as read",
            self.mark_all_in(inbox).await?,
        ))
    }

    async fn send(
        &self,
        req: &SendNotificationRequest,
    ) -> Result<ApiResponse<DeliveryResponse>, ServiceError> {
        info!("📣 Sending '{}' to {:?}", req.title, req.vendor_id);

        let tracing_ctx = self.telemetry.start(
            "send_notification",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("notification.kind", req.kind.as_str()),
                KeyValue::new("notification.broadcast", req.vendor_id.is_none()),
            ],
        );

        let recipients = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Notification sent",
            self.do_send(req).await,
        )?;

        Ok(ApiResponse::with_message(
            format!("Notification sent to {recipients} vendor(s)"),
            DeliveryResponse { recipients },
        ))
    }

    async fn invite_best_seller(
        &self,
        req: &BestSellerInviteRequest,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "invite_best_seller",
            vec![
                KeyValue::new("component", "notification"),
                KeyValue::new("vendor.id", req.vendor_id.to_string()),
            ],
        );

        let notification = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Best seller invitation sent",
            self.do_invite(req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Best seller invitation sent",
            notification,
        ))
    }

    async fn history(
        &self,
    ) -> Result<ApiResponse<Vec<NotificationHistoryResponse>>, ServiceError> {
        let sent = self.notifications.find_sent_to_vendors(HISTORY_LIMIT).await?;

        let mut vendor_ids: Vec<Uuid> = sent.iter().filter_map(|n| n.vendor_id).collect();
        vendor_ids.sort();
        vendor_ids.dedup();

        let names: HashMap<Uuid, String> = self
            .vendor_query
            .find_by_ids(&vendor_ids)
            .await?
            .into_iter()
            .map(|v| (v.id, v.store_name))
            .collect();

        let history = sent
            .into_iter()
            .map(|n| {
                let name = n
                    .vendor_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| UNKNOWN_VENDOR.to_string());
                NotificationHistoryResponse::new(n, name)
            })
            .collect();

        Ok(ApiResponse::success(history))
    }

    async fn admin_inbox(&self) -> Result<ApiResponse<Vec<NotificationResponse>>, ServiceError> {
        Ok(ApiResponse::success(self.list(Inbox::Admin).await?))
    }

    async fn admin_unread_count(
        &self,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError> {
        Ok(ApiResponse::success(self.unread(Inbox::Admin).await?))
    }

    async fn admin_mark_read(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<NotificationResponse>, ServiceError> {
        Ok(ApiResponse::with_message(
            "Notification marked as read",
            self.mark_read_in(Inbox::Admin, id).await?,
        ))
    }

    async fn admin_mark_all_read(
        &self,
    ) -> Result<ApiResponse<UnreadCountResponse>, ServiceError> {
        Ok(ApiResponse::with_message(
            "All notifications marked as read",
            self.mark_all_in(Inbox::Admin).await?,
        ))
    }
}
