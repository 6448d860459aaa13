use crate::{
    abstract_trait::{
        CategoryServiceTrait, DynCategoryRepository, DynNotificationRepository,
        DynVendorQueryRepository,
    },
    domain::{
        requests::{CreateCategoryRequest, CreateNotificationRecord},
        responses::{ApiResponse, CategoryResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Category, NotificationKind, VendorStatus},
    service::notify,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;

pub struct CategoryService {
    categories: DynCategoryRepository,
    vendor_query: DynVendorQueryRepository,
    notifications: DynNotificationRepository,
    telemetry: ServiceTelemetry,
}

impl CategoryService {
    pub fn new(
        categories: DynCategoryRepository,
        vendor_query: DynVendorQueryRepository,
        notifications: DynNotificationRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            categories,
            vendor_query,
            notifications,
            telemetry: ServiceTelemetry::new("category-service", registry),
        }
    }

    async fn do_create(&self, req: &CreateCategoryRequest) -> Result<Category, ServiceError> {
        let category = self
            .categories
            .create(req)
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists(_) => {
                    ServiceError::Conflict("Category with this slug already exists".into())
                }
                other => ServiceError::Repo(other),
            })?;

        let notices = self
            .vendor_query
            .find_by_status(VendorStatus::Approved)
            .await?
            .into_iter()
            .map(|vendor| {
                CreateNotificationRecord::for_vendor(
                    vendor.id,
                    NotificationKind::NewCategory,
                    "New category available",
                    format!(
                        "You can now list products under \"{}\"",
                        category.name
                    ),
                )
                .with_extra(json!({ "category_id": category.id, "slug": category.slug }))
            })
            .collect();

        notify::deliver_many(&self.notifications, notices).await;

        Ok(category)
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let categories = self.categories.find_all().await?;
        Ok(ApiResponse::success(
            categories.into_iter().map(CategoryResponse::from).collect(),
        ))
    }

    async fn create(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "create_category",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.slug", req.slug.clone()),
            ],
        );

        let category = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Category created",
            self.do_create(req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Category created successfully",
            CategoryResponse::from(category),
        ))
    }
}
