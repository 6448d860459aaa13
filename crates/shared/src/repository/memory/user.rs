use crate::{
    abstract_trait::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    domain::requests::{CreateUserRecord, FindAllUsers, UpdateProfileRequest, page_bounds},
    errors::RepositoryError,
    model::{Role, User},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{MemoryDatabase, contains_ignore_case, newest_first, page, search_term};

#[async_trait]
impl UserQueryRepositoryTrait for MemoryDatabase {
    async fn find_all(&self, req: &FindAllUsers) -> Result<(Vec<User>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let search = search_term(req.search.as_deref());
        let tables = self.tables.read().await;

        let matched = newest_first(
            tables
                .users
                .iter()
                .filter(|u| req.role.is_none_or(|role| u.role == role))
                .filter(|u| {
                    search.is_none_or(|s| {
                        contains_ignore_case(&u.name, s) || contains_ignore_case(&u.email, s)
                    })
                })
                .cloned(),
            |u| u.created_at,
        );

        let total = matched.len() as i64;
        Ok((page(matched, limit, offset), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> Result<i64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().filter(|u| u.created_at >= since).count() as i64)
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for MemoryDatabase {
    async fn create_user(&self, req: &CreateUserRecord) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        let email = req.email.to_lowercase();

        if tables.users.iter().any(|u| u.email == email) {
            return Err(RepositoryError::AlreadyExists(format!("users_email_key ({email})")));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            email,
            password: req.password_hash.clone(),
            role: req.role,
            phone: None,
            is_email_verified: false,
            is_blocked: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            user.name = name.clone();
        }
        if let Some(phone) = &req.phone {
            user.phone = Some(phone.clone());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        user.is_blocked = blocked;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;

        user.last_login = Some(Utc::now());
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == id) {
            return Err(RepositoryError::NotFound);
        }

        let vendor_id = tables.vendors.iter().find(|v| v.user_id == id).map(|v| v.id);
        if vendor_id.is_some_and(|vid| tables.order_items.iter().any(|i| i.vendor_id == vid)) {
            return Err(RepositoryError::ForeignKey("order_items_vendor_id_fkey".into()));
        }

        // Matches the ON DELETE CASCADE chain hanging off users.
        if let Some(vendor_id) = vendor_id {
            let products: Vec<Uuid> = tables
                .products
                .iter()
                .filter(|p| p.vendor_id == vendor_id)
                .map(|p| p.id)
                .collect();
            tables.products.retain(|p| p.vendor_id != vendor_id);
            tables.cart_items.retain(|c| !products.contains(&c.product_id));
            tables.reviews.retain(|r| !products.contains(&r.product_id));
            tables
                .wishlist_items
                .retain(|w| !products.contains(&w.product_id));
            tables
                .notifications
                .retain(|n| n.vendor_id != Some(vendor_id));
            tables.vendors.retain(|v| v.id != vendor_id);
        }

        let orders: Vec<Uuid> = tables
            .orders
            .iter()
            .filter(|o| o.user_id == id)
            .map(|o| o.id)
            .collect();
        tables.orders.retain(|o| o.user_id != id);
        tables.order_items.retain(|i| !orders.contains(&i.order_id));
        tables.refunds.retain(|r| r.user_id != id && !orders.contains(&r.order_id));
        tables.cart_items.retain(|c| c.user_id != id);
        tables.reviews.retain(|r| r.user_id != id);
        tables.wishlist_items.retain(|w| w.user_id != id);
        tables.users.retain(|u| u.id != id);
        Ok(())
    }
}
