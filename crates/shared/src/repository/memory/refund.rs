use crate::{
    abstract_trait::RefundRepositoryTrait,
    domain::requests::{CreateRefundRecord, FindAllRefunds, RefundScope, page_bounds},
    errors::RepositoryError,
    model::{Refund, RefundStatus},
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{MemoryDatabase, Tables, newest_first, page};

fn in_scope(tables: &Tables, scope: RefundScope, refund: &Refund) -> bool {
    match scope {
        RefundScope::All => true,
        RefundScope::User(user_id) => refund.user_id == user_id,
        RefundScope::Vendor(vendor_id) => tables
            .order_items
            .iter()
            .any(|i| i.order_id == refund.order_id && i.vendor_id == vendor_id),
    }
}

#[async_trait]
impl RefundRepositoryTrait for MemoryDatabase {
    async fn find_all(
        &self,
        scope: RefundScope,
        req: &FindAllRefunds,
    ) -> Result<(Vec<Refund>, i64), RepositoryError> {
        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let tables = self.tables.read().await;

        let matched = newest_first(
            tables
                .refunds
                .iter()
                .filter(|r| in_scope(&tables, scope, r))
                .filter(|r| req.status.is_none_or(|status| r.status == status))
                .filter(|r| req.order_id.is_none_or(|id| r.order_id == id))
                .cloned(),
            |r| r.created_at,
        );

        let total = matched.len() as i64;
        Ok((page(matched, limit, offset), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Refund>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.refunds.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Refund>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.refunds.iter().find(|r| r.order_id == order_id).cloned())
    }

    async fn create(&self, req: &CreateRefundRecord) -> Result<Refund, RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.orders.iter().any(|o| o.id == req.order_id) {
            return Err(RepositoryError::ForeignKey("refunds_order_id_fkey".into()));
        }
        if tables.refunds.iter().any(|r| r.order_id == req.order_id) {
            return Err(RepositoryError::AlreadyExists("refunds_order_id_key".into()));
        }

        let now = Utc::now();
        let refund = Refund {
            id: Uuid::new_v4(),
            order_id: req.order_id,
            user_id: req.user_id,
            amount: req.amount,
            reason: req.reason.clone(),
            status: RefundStatus::Requested,
            admin_note: None,
            processed_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.refunds.push(refund.clone());
        Ok(refund)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RefundStatus,
        admin_note: Option<&str>,
    ) -> Result<Refund, RepositoryError> {
        let mut tables = self.tables.write().await;
        let refund = tables
            .refunds
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepositoryError::NotFound)?;

        let now = Utc::now();
        refund.status = status;
        if let Some(note) = admin_note {
            refund.admin_note = Some(note.to_string());
        }
        if status == RefundStatus::Completed {
            refund.processed_at = Some(now);
        }
        refund.updated_at = now;
        Ok(refund.clone())
    }
}
