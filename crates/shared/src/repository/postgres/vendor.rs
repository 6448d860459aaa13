use crate::{
    abstract_trait::{VendorCommandRepositoryTrait, VendorQueryRepositoryTrait},
    config::ConnectionPool,
    domain::requests::{
        CreateVendorRecord, FindAllVendors, UpdateVendorProfileRequest, VendorStatusUpdate,
        page_bounds,
    },
    errors::RepositoryError,
    model::{Vendor, VendorStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

const VENDOR_COLUMNS: &str = "id, user_id, store_name, store_description, contact_email, phone, \
     city, state, categories, status, rejection_reason, approved_at, commission, rating, \
     review_count, is_verified, created_at, updated_at";

#[derive(Clone)]
pub struct VendorQueryRepository {
    db: ConnectionPool,
}

impl VendorQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VendorQueryRepositoryTrait for VendorQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllVendors,
    ) -> Result<(Vec<Vendor>, i64), RepositoryError> {
        info!(
            "🔍 Fetching vendors status={:?} category={:?}",
            req.status, req.category
        );

        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let status = req.status.map(|s| s.as_str());
        let category = req.category.as_deref().filter(|c| !c.trim().is_empty());

        const FILTER: &str =
            "($1::TEXT IS NULL OR status = $1) AND ($2::TEXT IS NULL OR $2 = ANY(categories))";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM vendors WHERE {FILTER}"))
                .bind(status)
                .bind(category)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    error!("❌ Failed to count vendors: {e:?}");
                    RepositoryError::from(e)
                })?;

        let vendors = sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE {FILTER} \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(status)
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch vendors: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok((vendors, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vendor>, RepositoryError> {
        sqlx::query_as::<_, Vendor>(&format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Vendor>, RepositoryError> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Vendor>, RepositoryError> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_status(&self, status: VendorStatus) -> Result<Vec<Vendor>, RepositoryError> {
        sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE status = $1 ORDER BY created_at DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM vendors WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)
    }
}

#[derive(Clone)]
pub struct VendorCommandRepository {
    db: ConnectionPool,
}

impl VendorCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VendorCommandRepositoryTrait for VendorCommandRepository {
    async fn create_vendor(&self, req: &CreateVendorRecord) -> Result<Vendor, RepositoryError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            "INSERT INTO vendors (id, user_id, store_name, store_description, contact_email, \
             phone, city, state, categories) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {VENDOR_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.user_id)
        .bind(&req.store_name)
        .bind(req.store_description.as_deref())
        .bind(&req.contact_email)
        .bind(req.phone.as_deref())
        .bind(req.city.as_deref())
        .bind(req.state.as_deref())
        .bind(&req.categories)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create vendor {}: {e:?}", req.store_name);
            RepositoryError::from(e)
        })?;

        info!("✅ Created vendor {} ({})", vendor.id, vendor.store_name);
        Ok(vendor)
    }

    async fn update_status(
        &self,
        id: Uuid,
        update: &VendorStatusUpdate,
    ) -> Result<Vendor, RepositoryError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            "UPDATE vendors SET status = $2, rejection_reason = $3, approved_at = $4, \
             is_verified = $5, updated_at = now() WHERE id = $1 RETURNING {VENDOR_COLUMNS}"
        ))
        .bind(id)
        .bind(update.status.as_str())
        .bind(update.rejection_reason.as_deref())
        .bind(update.approved_at)
        .bind(update.is_verified)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update status of vendor {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🔄 Vendor {id} is now {}", vendor.status);
        Ok(vendor)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateVendorProfileRequest,
    ) -> Result<Vendor, RepositoryError> {
        sqlx::query_as::<_, Vendor>(&format!(
            "UPDATE vendors SET store_description = COALESCE($2, store_description), \
             phone = COALESCE($3, phone), city = COALESCE($4, city), \
             state = COALESCE($5, state), categories = COALESCE($6, categories), \
             updated_at = now() WHERE id = $1 RETURNING {VENDOR_COLUMNS}"
        ))
        .bind(id)
        .bind(req.store_description.as_deref())
        .bind(req.phone.as_deref())
        .bind(req.city.as_deref())
        .bind(req.state.as_deref())
        .bind(req.categories.as_deref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update vendor {id}: {e:?}");
            RepositoryError::from(e)
        })
    }
}
