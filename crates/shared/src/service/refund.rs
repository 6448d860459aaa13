use crate::{
    abstract_trait::{
        DynNotificationRepository, DynOrderCommandRepository, DynOrderQueryRepository,
        DynRefundRepository, DynVendorQueryRepository, RefundServiceTrait,
    },
    domain::{
        Identity,
        requests::{
            CreateNotificationRecord, CreateRefundRecord, CreateRefundRequest, FindAllRefunds,
            RefundScope, UpdateOrderRequest, UpdateRefundRequest, page_bounds,
        },
        responses::{ApiResponse, ApiResponsePagination, Pagination, RefundResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{NotificationKind, PaymentStatus, Refund, RefundStatus, Role, VendorStatus},
    service::{notify, vendor::approved_vendor_of},
    utils::{Method, ServiceTelemetry, format_amount},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

const REFUND_NOT_FOUND: &str = "Refund not found";
const REFUND_EXISTS: &str = "Refund request already exists for this order";
const ORDER_NOT_YOURS: &str = "Order not found or does not belong to you";

pub struct RefundServiceDeps {
    pub refunds: DynRefundRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub vendor_query: DynVendorQueryRepository,
    pub notifications: DynNotificationRepository,
}

pub struct RefundService {
    refunds: DynRefundRepository,
    order_query: DynOrderQueryRepository,
    order_command: DynOrderCommandRepository,
    vendor_query: DynVendorQueryRepository,
    notifications: DynNotificationRepository,
    telemetry: ServiceTelemetry,
}

impl RefundService {
    pub fn new(deps: RefundServiceDeps, registry: &mut Registry) -> Self {
        let RefundServiceDeps {
            refunds,
            order_query,
            order_command,
            vendor_query,
            notifications,
        } = deps;

        Self {
            refunds,
            order_query,
            order_command,
            vendor_query,
            notifications,
            telemetry: ServiceTelemetry::new("refund-service", registry),
        }
    }

    async fn scope_for(&self, actor: &Identity) -> Result<RefundScope, ServiceError> {
        Ok(match actor.role {
            Role::Admin => RefundScope::All,
            Role::Vendor => {
                RefundScope::Vendor(approved_vendor_of(&self.vendor_query, actor).await?.id)
            }
            Role::User => RefundScope::User(actor.user_id),
        })
    }

    /// Whether the caller is an approved vendor with a line on the order.
    async fn vendor_in_order(
        &self,
        actor: &Identity,
        order_id: Uuid,
    ) -> Result<bool, ServiceError> {
        if actor.role != Role::Vendor {
            return Ok(false);
        }

        let vendor = match self.vendor_query.find_by_user_id(actor.user_id).await? {
            Some(vendor) if vendor.status == VendorStatus::Approved => vendor,
            _ => return Ok(false),
        };

        let items = self.order_query.find_items(&[order_id]).await?;
        Ok(items.iter().any(|i| i.vendor_id == vendor.id))
    }

    async fn load(&self, id: Uuid) -> Result<Refund, ServiceError> {
        self.refunds
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(REFUND_NOT_FOUND.into()))
    }

    async fn do_create(
        &self,
        actor: &Identity,
        req: &CreateRefundRequest,
    ) -> Result<Refund, ServiceError> {
        let reason = req.reason.trim();
        if reason.is_empty() {
            return Err(ServiceError::BadRequest("Reason is required".into()));
        }

        let order = self
            .order_query
            .find_by_id(req.order_id)
            .await?
            .filter(|o| o.user_id == actor.user_id)
            .ok_or_else(|| ServiceError::NotFound(ORDER_NOT_YOURS.into()))?;

        if order.payment_status == PaymentStatus::Refunded {
            return Err(ServiceError::BadRequest("Order has already been refunded".into()));
        }

        if self.refunds.find_by_order(order.id).await?.is_some() {
            return Err(ServiceError::BadRequest(REFUND_EXISTS.into()));
        }

        let amount = req.amount.unwrap_or(order.final_amount);
        if amount <= 0 {
            return Err(ServiceError::BadRequest("Order has nothing to refund".into()));
        }
        if amount > order.final_amount {
            return Err(ServiceError::BadRequest(
                "Refund amount cannot exceed the order total".into(),
            ));
        }

        let record = CreateRefundRecord {
            order_id: order.id,
            user_id: actor.user_id,
            amount,
            reason: reason.to_string(),
        };

        let refund = self
            .refunds
            .create(&record)
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists(_) => ServiceError::BadRequest(REFUND_EXISTS.into()),
                other => ServiceError::Repo(other),
            })?;

        notify::deliver(
            &self.notifications,
            CreateNotificationRecord::for_admin(
                NotificationKind::System,
                "Refund requested",
                format!(
                    "{} requested a refund of {} on order {}",
                    actor.name,
                    format_amount(amount),
                    order.id
                ),
            )
            .with_extra(json!({ "refund_id": refund.id, "order_id": order.id })),
        )
        .await;

        info!("💸 {} requested a refund on order {}", actor.email, order.id);
        Ok(refund)
    }

    async fn do_update_status(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateRefundRequest,
    ) -> Result<Refund, ServiceError> {
        let refund = self.load(id).await?;

        match actor.role {
            Role::Admin => {}
            Role::Vendor if self.vendor_in_order(actor, refund.order_id).await? => {}
            Role::Vendor => return Err(ServiceError::Forbidden("Access denied".into())),
            Role::User => {
                return Err(ServiceError::Forbidden(
                    "Only admins and vendors can update refunds".into(),
                ));
            }
        }

        let decision = matches!(req.status, RefundStatus::Approved | RefundStatus::Rejected);
        if decision && !actor.is_admin() {
            return Err(ServiceError::Forbidden(
                "Only admin can approve/reject refunds".into(),
            ));
        }

        if !refund.status.can_move_to(req.status) {
            return Err(ServiceError::BadRequest(format!(
                "Cannot move refund from {} to {}",
                refund.status, req.status
            )));
        }

        if req.status == RefundStatus::Completed {
            let paid_back = UpdateOrderRequest {
                payment_status: Some(PaymentStatus::Refunded),
                ..Default::default()
            };
            self.order_command
                .update_order(refund.order_id, &paid_back)
                .await
                .map_err(|e| ServiceError::not_found_or(e, "Order not found"))?;
        }

        let updated = self
            .refunds
            .update_status(id, req.status, req.admin_note.as_deref())
            .await
            .map_err(|e| ServiceError::not_found_or(e, REFUND_NOT_FOUND))?;

        info!("🔄 Refund {id} moved from {} to {}", refund.status, updated.status);
        Ok(updated)
    }
}

#[async_trait]
impl RefundServiceTrait for RefundService {
    async fn find_all(
        &self,
        actor: &Identity,
        req: &FindAllRefunds,
    ) -> Result<ApiResponsePagination<Vec<RefundResponse>>, ServiceError> {
        let (page, limit, _) = page_bounds(req.page, req.limit);

        let tracing_ctx = self.telemetry.start(
            "find_all_refunds",
            vec![
                KeyValue::new("component", "refund"),
                KeyValue::new("role", actor.role.as_str()),
            ],
        );

        let result = async {
            let scope = self.scope_for(actor).await?;
            Ok::<_, ServiceError>(self.refunds.find_all(scope, req).await?)
        }
        .await;

        let (refunds, total) =
            self.telemetry
                .finish(&tracing_ctx, Method::Get, "Refunds fetched", result)?;

        Ok(ApiResponsePagination::new(
            refunds.into_iter().map(RefundResponse::from).collect(),
            Pagination::new(page, limit, total),
        ))
    }

    async fn find_by_id(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<RefundResponse>, ServiceError> {
        let refund = self.load(id).await?;

        let allowed = actor.is_admin()
            || refund.user_id == actor.user_id
            || self.vendor_in_order(actor, refund.order_id).await?;

        if !allowed {
            return Err(ServiceError::Forbidden("Access denied".into()));
        }

        Ok(ApiResponse::success(RefundResponse::from(refund)))
    }

    async fn create(
        &self,
        actor: &Identity,
        req: &CreateRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "create_refund",
            vec![
                KeyValue::new("component", "refund"),
                KeyValue::new("order.id", req.order_id.to_string()),
            ],
        );

        let refund = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Refund requested",
            self.do_create(actor, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Refund requested successfully",
            RefundResponse::from(refund),
        ))
    }

    async fn update_status(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateRefundRequest,
    ) -> Result<ApiResponse<RefundResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "update_refund_status",
            vec![
                KeyValue::new("component", "refund"),
                KeyValue::new("refund.id", id.to_string()),
                KeyValue::new("refund.status", req.status.as_str()),
            ],
        );

        let refund = self.telemetry.finish(
            &tracing_ctx,
            Method::Put,
            "Refund updated",
            self.do_update_status(actor, id, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Refund updated successfully",
            RefundResponse::from(refund),
        ))
    }
}
