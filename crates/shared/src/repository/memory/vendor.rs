use crate::{
    abstract_trait::{VendorCommandRepositoryTrait, VendorQueryRepositoryTrait},
    domain::requests::{
        CreateVendorRecord, FindAllVendors, UpdateVendorProfileRequest, VendorStatusUpdate,
        page_bounds,
    },
    errors::RepositoryError,
    model::{Vendor, VendorStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{MemoryDatabase, newest_first, page};

const DEFAULT_COMMISSION: i32 = 10;

#[async_trait]
impl VendorQueryRepositoryTrait for MemoryDatabase {
    async fn find_all(
        &self,
        req: &FindAllVendors,
    ) -> Result<(Vec<Vendor>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let category = req.category.as_deref().filter(|c| !c.trim().is_empty());
        let tables = self.tables.read().await;

        let matched = newest_first(
            tables
                .vendors
                .iter()
                .filter(|v| req.status.is_none_or(|s| v.status == s))
                .filter(|v| category.is_none_or(|c| v.categories.iter().any(|vc| vc == c)))
                .cloned(),
            |v| v.created_at,
        );

        let total = matched.len() as i64;
        Ok((page(matched, limit, offset), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vendor>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.vendors.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Vendor>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.vendors.iter().find(|v| v.user_id == user_id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Vendor>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .vendors
            .iter()
            .filter(|v| ids.contains(&v.id))
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: VendorStatus) -> Result<Vec<Vendor>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.vendors.iter().filter(|v| v.status == status).cloned(),
            |v| v.created_at,
        ))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.tables.read().await.vendors.len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.vendors.iter().filter(|v| v.created_at >= since).count() as i64)
    }
}

#[async_trait]
impl VendorCommandRepositoryTrait for MemoryDatabase {
    async fn create_vendor(&self, req: &CreateVendorRecord) -> Result<Vendor, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.vendors.iter().any(|v| v.user_id == req.user_id) {
            return Err(RepositoryError::AlreadyExists("vendors_user_id_key".into()));
        }
        if tables
            .vendors
            .iter()
            .any(|v| v.store_name.eq_ignore_ascii_case(&req.store_name))
        {
            return Err(RepositoryError::AlreadyExists("vendors_store_name_key".into()));
        }

        let now = Utc::now();
        let vendor = Vendor {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            store_name: req.store_name.clone(),
            store_description: req.store_description.clone(),
            contact_email: req.contact_email.clone(),
            phone: req.phone.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
            categories: req.categories.clone(),
            status: VendorStatus::Pending,
            rejection_reason: None,
            approved_at: None,
            commission: DEFAULT_COMMISSION,
            rating: 0.0,
            review_count: 0,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        tables.vendors.push(vendor.clone());
        Ok(vendor)
    }

    async fn update_status(
        &self,
        id: Uuid,
        update: &VendorStatusUpdate,
    ) -> Result<Vendor, RepositoryError> {
        let mut tables = self.tables.write().await;
        let vendor = tables
            .vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(RepositoryError::NotFound)?;

        vendor.status = update.status;
        vendor.rejection_reason = update.rejection_reason.clone();
        vendor.approved_at = update.approved_at;
        vendor.is_verified = update.is_verified;
        vendor.updated_at = Utc::now();
        Ok(vendor.clone())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateVendorProfileRequest,
    ) -> Result<Vendor, RepositoryError> {
        let mut tables = self.tables.write().await;
        let vendor = tables
            .vendors
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(description) = &req.store_description {
            vendor.store_description = Some(description.clone());
        }
        if let Some(phone) = &req.phone {
            vendor.phone = Some(phone.clone());
        }
        if let Some(city) = &req.city {
            vendor.city = Some(city.clone());
        }
        if let Some(state) = &req.state {
            vendor.state = Some(state.clone());
        }
        if let Some(categories) = &req.categories {
            vendor.categories = categories.clone();
        }
        vendor.updated_at = Utc::now();
        Ok(vendor.clone())
    }
}
