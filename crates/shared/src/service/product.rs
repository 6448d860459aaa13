use crate::{
    abstract_trait::{
        DynNotificationRepository, DynProductCommandRepository, DynProductQueryRepository,
        DynVendorQueryRepository, ProductServiceTrait,
    },
    domain::{
        Identity,
        requests::{
            CreateNotificationRecord, CreateProductRecord, CreateProductRequest, FindAllProducts,
            ProductListFilter, ProductSort, ReviewProductRequest, UpdateProductRequest,
            page_bounds,
        },
        responses::{ApiResponse, ApiResponsePagination, Pagination, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{NotificationKind, Product, ProductStatus, Role, VendorStatus},
    service::{
        notify,
        vendor::{VENDOR_NOT_APPROVED, VENDOR_PROFILE_NOT_FOUND},
    },
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

const PRODUCT_NOT_FOUND: &str = "Product not found";
const SALE_FILTER: &str = "sale";

pub struct ProductServiceDeps {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
    pub vendor_query: DynVendorQueryRepository,
    pub notifications: DynNotificationRepository,
}

pub struct ProductService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    vendor_query: DynVendorQueryRepository,
    notifications: DynNotificationRepository,
    telemetry: ServiceTelemetry,
}

impl ProductService {
    pub fn new(deps: ProductServiceDeps, registry: &mut Registry) -> Self {
        let ProductServiceDeps {
            query,
            command,
            vendor_query,
            notifications,
        } = deps;

        Self {
            query,
            command,
            vendor_query,
            notifications,
            telemetry: ServiceTelemetry::new("product-service", registry),
        }
    }

    async fn list(
        &self,
        mut filter: ProductListFilter,
        page: i64,
        limit: i64,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let (page, limit, offset) = page_bounds(page, limit);
        filter.limit = limit;
        filter.offset = offset;

        let (products, total) = self.query.find_all(&filter).await?;

        Ok(ApiResponsePagination::new(
            products.into_iter().map(ProductResponse::from).collect(),
            Pagination::new(page, limit, total),
        ))
    }

    async fn find_product(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(PRODUCT_NOT_FOUND.into()))
    }

    /// Vendor id a new product is created under.
    async fn resolve_owner(
        &self,
        actor: &Identity,
        req: &CreateProductRequest,
    ) -> Result<Uuid, ServiceError> {
        match actor.role {
            Role::Admin => {
                let vendor_id = req.vendor_id.ok_or_else(|| {
                    ServiceError::BadRequest("vendor_id is required for admin".into())
                })?;
                self.vendor_query
                    .find_by_id(vendor_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Vendor not found".into()))?;
                Ok(vendor_id)
            }
            Role::Vendor => {
                let vendor = self
                    .vendor_query
                    .find_by_user_id(actor.user_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(VENDOR_PROFILE_NOT_FOUND.into()))?;

                if vendor.status != VendorStatus::Approved {
                    return Err(ServiceError::Forbidden(VENDOR_NOT_APPROVED.into()));
                }
                if req.vendor_id.is_some_and(|id| id != vendor.id) {
                    return Err(ServiceError::Forbidden(
                        "Cannot create products for another vendor".into(),
                    ));
                }
                Ok(vendor.id)
            }
            Role::User => Err(ServiceError::Forbidden(
                "Only vendors and admins can create products".into(),
            )),
        }
    }

    /// Loads the product and checks the caller may change it.
    async fn owned_product(&self, actor: &Identity, id: Uuid) -> Result<Product, ServiceError> {
        let product = self.find_product(id).await?;

        if actor.is_admin() {
            return Ok(product);
        }

        let owns = match self.vendor_query.find_by_user_id(actor.user_id).await? {
            Some(vendor) => actor.role == Role::Vendor && vendor.id == product.vendor_id,
            None => false,
        };

        if !owns {
            return Err(ServiceError::Forbidden(
                "You can only manage your own products".into(),
            ));
        }

        Ok(product)
    }

    async fn do_create(
        &self,
        actor: &Identity,
        req: &CreateProductRequest,
    ) -> Result<Product, ServiceError> {
        let vendor_id = self.resolve_owner(actor, req).await?;

        let record = CreateProductRecord {
            vendor_id,
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            price: req.price,
            discount: req.discount,
            category: req.category.trim().to_string(),
            images: req.images.clone(),
            stock: req.stock,
            sku: req.sku.clone(),
            tags: req.tags.clone(),
        };

        Ok(self.command.create_product(&record).await?)
    }

    async fn do_review(
        &self,
        id: Uuid,
        req: &ReviewProductRequest,
    ) -> Result<Product, ServiceError> {
        let product = self.find_product(id).await?;

        let approved_at = (req.status == ProductStatus::Approved).then(Utc::now);
        let reason = match req.status {
            ProductStatus::Rejected => req.reason.clone(),
            _ => None,
        };

        let updated = self
            .command
            .update_status(product.id, req.status, reason, approved_at)
            .await
            .map_err(|e| ServiceError::not_found_or(e, PRODUCT_NOT_FOUND))?;

        let mut message = format!("Your product \"{}\" has been {}.", updated.name, updated.status);
        if let Some(reason) = updated.rejection_reason.as_deref() {
            message.push_str(&format!(" Reason: {reason}"));
        }

        notify::deliver(
            &self.notifications,
            CreateNotificationRecord::for_vendor(
                updated.vendor_id,
                NotificationKind::System,
                format!("Product {}", updated.status),
                message,
            )
            .with_extra(json!({ "product_id": updated.id, "status": updated.status })),
        )
        .await;

        Ok(updated)
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn find_public(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!("🔍 Browsing products: {req:?}");

        let tracing_ctx = self.telemetry.start(
            "find_public_products",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", req.page),
                KeyValue::new("limit", req.limit),
            ],
        );

        let filter = ProductListFilter {
            status: Some(ProductStatus::Approved),
            only_approved_vendors: true,
            category: req.category.clone(),
            on_sale: req
                .filter
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(SALE_FILTER)),
            search: req.search.clone(),
            vendor_id: req.vendor_id,
            sort: req.sort,
            ..Default::default()
        };

        self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Products fetched",
            self.list(filter, req.page, req.limit).await,
        )
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "find_product_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Product fetched",
            self.find_product(id).await,
        )?;

        Ok(ApiResponse::success(ProductResponse::from(product)))
    }

    async fn find_pending(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let filter = ProductListFilter {
            status: Some(ProductStatus::Pending),
            sort: ProductSort::New,
            ..Default::default()
        };

        self.list(filter, page, limit).await
    }

    async fn find_mine(
        &self,
        actor: &Identity,
        page: i64,
        limit: i64,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let vendor = self
            .vendor_query
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(VENDOR_PROFILE_NOT_FOUND.into()))?;

        let filter = ProductListFilter {
            vendor_id: Some(vendor.id),
            sort: ProductSort::New,
            ..Default::default()
        };

        self.list(filter, page, limit).await
    }

    async fn create(
        &self,
        actor: &Identity,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("📦 Creating product '{}' as {}", req.name, actor.email);

        let tracing_ctx = self.telemetry.start(
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let product = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Product created",
            self.do_create(actor, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Product created successfully",
            ProductResponse::from(product),
        ))
    }

    async fn update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = async {
            self.owned_product(actor, id).await?;
            self.command
                .update_product(id, req)
                .await
                .map_err(|e| ServiceError::not_found_or(e, PRODUCT_NOT_FOUND))
        }
        .await;

        let product = self
            .telemetry
            .finish(&tracing_ctx, Method::Put, "Product updated", result)?;

        Ok(ApiResponse::with_message(
            "Product updated successfully",
            ProductResponse::from(product),
        ))
    }

    async fn delete(&self, actor: &Identity, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "delete_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = async {
            self.owned_product(actor, id).await?;
            self.command
                .delete_product(id)
                .await
                .map_err(|err| match err {
                    RepositoryError::ForeignKey(_) => ServiceError::Conflict(
                        "Product has existing orders and cannot be deleted".into(),
                    ),
                    other => ServiceError::not_found_or(other, PRODUCT_NOT_FOUND),
                })
        }
        .await;

        self.telemetry
            .finish(&tracing_ctx, Method::Delete, "Product deleted", result)?;

        Ok(ApiResponse::with_message("Product deleted successfully", ()))
    }

    async fn review(
        &self,
        id: Uuid,
        req: &ReviewProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🧾 Reviewing product {id} -> {}", req.status);

        let tracing_ctx = self.telemetry.start(
            "review_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
                KeyValue::new("product.status", req.status.as_str()),
            ],
        );

        let product = self.telemetry.finish(
            &tracing_ctx,
            Method::Put,
            "Product status updated",
            self.do_review(id, req).await,
        )?;

        Ok(ApiResponse::with_message(
            format!("Product {} successfully", product.status),
            ProductResponse::from(product),
        ))
    }
}
