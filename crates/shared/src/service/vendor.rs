use crate::{
    abstract_trait::{
        DynNotificationRepository, DynUserCommandRepository, DynUserQueryRepository,
        DynVendorCommandRepository, DynVendorQueryRepository, VendorServiceTrait,
    },
    domain::{
        Identity,
        requests::{
            CreateNotificationRecord, CreateVendorRecord, CreateVendorRequest, FindAllVendors,
            ReviewVendorRequest, UpdateVendorProfileRequest, VendorStatusUpdate, page_bounds,
        },
        responses::{ApiResponse, ApiResponsePagination, Pagination, VendorResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{NotificationKind, Role, Vendor, VendorStatus},
    service::notify,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

pub(crate) const VENDOR_PROFILE_NOT_FOUND: &str = "Vendor profile not found";
pub(crate) const VENDOR_NOT_APPROVED: &str = "Vendor account is not approved";
const VENDOR_NOT_FOUND: &str = "Vendor not found";

pub struct VendorServiceDeps {
    pub query: DynVendorQueryRepository,
    pub command: DynVendorCommandRepository,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub notifications: DynNotificationRepository,
}

pub struct VendorService {
    query: DynVendorQueryRepository,
    command: DynVendorCommandRepository,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    notifications: DynNotificationRepository,
    telemetry: ServiceTelemetry,
}

/// The caller's vendor profile, which must be approved.
pub(crate) async fn approved_vendor_of(
    query: &DynVendorQueryRepository,
    actor: &Identity,
) -> Result<Vendor, ServiceError> {
    let vendor = query
        .find_by_user_id(actor.user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(VENDOR_PROFILE_NOT_FOUND.into()))?;

    if vendor.status != VendorStatus::Approved {
        return Err(ServiceError::Forbidden(VENDOR_NOT_APPROVED.into()));
    }

    Ok(vendor)
}

fn review_message(vendor: &Vendor, status: VendorStatus, reason: Option<&str>) -> String {
    let base = match status {
        VendorStatus::Approved => format!(
            "Congratulations! {} has been approved. You can now start listing products.",
            vendor.store_name
        ),
        VendorStatus::Rejected => {
            format!("Your vendor application for {} was rejected.", vendor.store_name)
        }
        VendorStatus::Suspended => format!("{} has been suspended.", vendor.store_name),
        VendorStatus::Pending => format!("{} is back under review.", vendor.store_name),
    };

    match reason {
        Some(reason) if !reason.trim().is_empty() => format!("{base} Reason: {reason}"),
        _ => base,
    }
}

impl VendorService {
    pub fn new(deps: VendorServiceDeps, registry: &mut Registry) -> Self {
        let VendorServiceDeps {
            query,
            command,
            user_query,
            user_command,
            notifications,
        } = deps;

        Self {
            query,
            command,
            user_query,
            user_command,
            notifications,
            telemetry: ServiceTelemetry::new("vendor-service", registry),
        }
    }

    async fn paginate(
        &self,
        req: &FindAllVendors,
    ) -> Result<ApiResponsePagination<Vec<VendorResponse>>, ServiceError> {
        let (page, limit, _) = page_bounds(req.page, req.limit);
        let (vendors, total) = self.query.find_all(req).await?;

        Ok(ApiResponsePagination::new(
            vendors.into_iter().map(VendorResponse::from).collect(),
            Pagination::new(page, limit, total),
        ))
    }

    async fn do_apply(
        &self,
        actor: &Identity,
        req: &CreateVendorRequest,
    ) -> Result<Vendor, ServiceError> {
        if self.query.find_by_user_id(actor.user_id).await?.is_some() {
            return Err(ServiceError::Conflict(
                "You already have a vendor profile".into(),
            ));
        }

        let record = CreateVendorRecord {
            user_id: actor.user_id,
            store_name: req.store_name.trim().to_string(),
            store_description: req.store_description.clone(),
            contact_email: req.contact_email.trim().to_lowercase(),
            phone: req.phone.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            categories: req.categories.clone(),
        };

        let vendor = self
            .command
            .create_vendor(&record)
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists(detail) if detail.contains("user_id") => {
                    ServiceError::Conflict("You already have a vendor profile".into())
                }
                RepositoryError::AlreadyExists(_) => {
                    ServiceError::Conflict("Store name is already taken".into())
                }
                other => ServiceError::Repo(other),
            })?;

        notify::deliver(
            &self.notifications,
            CreateNotificationRecord::for_admin(
                NotificationKind::NewVendor,
                "New vendor application",
                format!("{} has applied to become a vendor", vendor.store_name),
            )
            .with_extra(json!({ "vendor_id": vendor.id })),
        )
        .await;

        Ok(vendor)
    }

    async fn do_review(&self, req: &ReviewVendorRequest) -> Result<Vendor, ServiceError> {
        let vendor = self
            .query
            .find_by_id(req.vendor_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(VENDOR_NOT_FOUND.into()))?;

        let approved = req.status == VendorStatus::Approved;
        let update = VendorStatusUpdate {
            status: req.status,
            rejection_reason: match req.status {
                VendorStatus::Rejected | VendorStatus::Suspended => req.reason.clone(),
                _ => None,
            },
            approved_at: approved.then(Utc::now),
            is_verified: approved,
        };

        let updated = self
            .command
            .update_status(vendor.id, &update)
            .await
            .map_err(|e| ServiceError::not_found_or(e, VENDOR_NOT_FOUND))?;

        if approved {
            let owner = self.user_query.find_by_id(updated.user_id).await?;
            if let Some(owner) = owner.filter(|u| u.role == Role::User) {
                self.user_command.update_role(owner.id, Role::Vendor).await?;
                info!("🏪 {} is now a vendor", owner.email);
            }
        }

        notify::deliver(
            &self.notifications,
            CreateNotificationRecord::for_vendor(
                updated.id,
                NotificationKind::System,
                format!("Vendor application {}", updated.status),
                review_message(&updated, updated.status, req.reason.as_deref()),
            )
            .with_extra(json!({ "status": updated.status })),
        )
        .await;

        Ok(updated)
    }
}

#[async_trait]
impl VendorServiceTrait for VendorService {
    async fn apply(
        &self,
        actor: &Identity,
        req: &CreateVendorRequest,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        info!("🏪 Vendor application from {}: {}", actor.email, req.store_name);

        let tracing_ctx = self.telemetry.start(
            "apply_vendor",
            vec![
                KeyValue::new("component", "vendor"),
                KeyValue::new("user.id", actor.user_id.to_string()),
                KeyValue::new("vendor.store_name", req.store_name.clone()),
            ],
        );

        let vendor = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Vendor application submitted",
            self.do_apply(actor, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Vendor application submitted successfully",
            VendorResponse::from(vendor),
        ))
    }

    async fn find_public(
        &self,
        req: &FindAllVendors,
    ) -> Result<ApiResponsePagination<Vec<VendorResponse>>, ServiceError> {
        let approved_only = FindAllVendors {
            status: Some(VendorStatus::Approved),
            ..req.clone()
        };

        let tracing_ctx = self
            .telemetry
            .start("find_public_vendors", vec![KeyValue::new("component", "vendor")]);

        self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Public vendors fetched",
            self.paginate(&approved_only).await,
        )
    }

    async fn find_all(
        &self,
        req: &FindAllVendors,
    ) -> Result<ApiResponsePagination<Vec<VendorResponse>>, ServiceError> {
        let tracing_ctx = self
            .telemetry
            .start("find_all_vendors", vec![KeyValue::new("component", "vendor")]);

        self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Vendors fetched",
            self.paginate(req).await,
        )
    }

    async fn find_pending(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<ApiResponsePagination<Vec<VendorResponse>>, ServiceError> {
        let req = FindAllVendors {
            page,
            limit,
            status: Some(VendorStatus::Pending),
            category: None,
        };

        self.paginate(&req).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        let vendor = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(VENDOR_NOT_FOUND.into()))?;

        Ok(ApiResponse::success(VendorResponse::from(vendor)))
    }

    async fn my_profile(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        let vendor = self
            .query
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(VENDOR_PROFILE_NOT_FOUND.into()))?;

        Ok(ApiResponse::success(VendorResponse::from(vendor)))
    }

    async fn update_my_profile(
        &self,
        actor: &Identity,
        req: &UpdateVendorProfileRequest,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "update_vendor_profile",
            vec![
                KeyValue::new("component", "vendor"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let result = async {
            let vendor = self
                .query
                .find_by_user_id(actor.user_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(VENDOR_PROFILE_NOT_FOUND.into()))?;

            Ok::<_, ServiceError>(self.command.update_profile(vendor.id, req).await?)
        }
        .await;

        let vendor =
            self.telemetry
                .finish(&tracing_ctx, Method::Put, "Vendor profile updated", result)?;

        Ok(ApiResponse::with_message(
            "Vendor profile updated successfully",
            VendorResponse::from(vendor),
        ))
    }

    async fn review(
        &self,
        req: &ReviewVendorRequest,
    ) -> Result<ApiResponse<VendorResponse>, ServiceError> {
        info!("🧾 Reviewing vendor {} -> {}", req.vendor_id, req.status);

        let tracing_ctx = self.telemetry.start(
            "review_vendor",
            vec![
                KeyValue::new("component", "vendor"),
                KeyValue::new("vendor.id", req.vendor_id.to_string()),
                KeyValue::new("vendor.status", req.status.as_str()),
            ],
        );

        let vendor = self.telemetry.finish(
            &tracing_ctx,
            Method::Put,
            "Vendor status updated",
            self.do_review(req).await,
        )?;

        Ok(ApiResponse::with_message(
            format!("Vendor {} successfully", vendor.status),
            VendorResponse::from(vendor),
        ))
    }

    async fn require_approved(&self, actor: &Identity) -> Result<Vendor, ServiceError> {
        approved_vendor_of(&self.query, actor).await
    }
}
