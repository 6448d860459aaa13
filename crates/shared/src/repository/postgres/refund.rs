use crate::{
    abstract_trait::RefundRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateRefundRecord, FindAllRefunds, RefundScope, page_bounds},
    errors::RepositoryError,
    model::{Refund, RefundStatus},
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const REFUND_COLUMNS: &str = "id, order_id, user_id, amount, reason, status, admin_note, \
     processed_at, created_at, updated_at";

const FILTER: &str = "($1::UUID IS NULL OR user_id = $1) \
     AND ($2::UUID IS NULL OR EXISTS ( \
         SELECT 1 FROM order_items oi \
         WHERE oi.order_id = refunds.order_id AND oi.vendor_id = $2)) \
     AND ($3::TEXT IS NULL OR status = $3) \
     AND ($4::UUID IS NULL OR order_id = $4)";

/// `(user_id, vendor_id)` bind values for a scope.
fn scope_binds(scope: RefundScope) -> (Option<Uuid>, Option<Uuid>) {
    match scope {
        RefundScope::All => (None, None),
        RefundScope::User(id) => (Some(id), None),
        RefundScope::Vendor(id) => (None, Some(id)),
    }
}

#[derive(Clone)]
pub struct RefundRepository {
    db: ConnectionPool,
}

impl RefundRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefundRepositoryTrait for RefundRepository {
    async fn find_all(
        &self,
        scope: RefundScope,
        req: &FindAllRefunds,
    ) -> Result<(Vec<Refund>, i64), RepositoryError> {
        info!("🔍 Fetching refunds {scope:?} status={:?}", req.status);

        let (_, limit, offset) = page_bounds(req.page, req.limit);
        let (user_id, vendor_id) = scope_binds(scope);
        let status = req.status.map(|s| s.as_str());

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM refunds WHERE {FILTER}"))
                .bind(user_id)
                .bind(vendor_id)
                .bind(status)
                .bind(req.order_id)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    error!("❌ Failed to count refunds: {e:?}");
                    RepositoryError::from(e)
                })?;

        let refunds = sqlx::query_as::<_, Refund>(&format!(
            "SELECT {REFUND_COLUMNS} FROM refunds WHERE {FILTER} \
             ORDER BY created_at DESC, id LIMIT $5 OFFSET $6"
        ))
        .bind(user_id)
        .bind(vendor_id)
        .bind(status)
        .bind(req.order_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch refunds: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok((refunds, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Refund>, RepositoryError> {
        sqlx::query_as::<_, Refund>(&format!(
            "SELECT {REFUND_COLUMNS} FROM refunds WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Refund>, RepositoryError> {
        sqlx::query_as::<_, Refund>(&format!(
            "SELECT {REFUND_COLUMNS} FROM refunds WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn create(&self, req: &CreateRefundRecord) -> Result<Refund, RepositoryError> {
        let refund = sqlx::query_as::<_, Refund>(&format!(
            "INSERT INTO refunds (id, order_id, user_id, amount, reason) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {REFUND_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.order_id)
        .bind(req.user_id)
        .bind(req.amount)
        .bind(&req.reason)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create refund for order {}: {e:?}", req.order_id);
            RepositoryError::from(e)
        })?;

        info!("💸 Refund {} requested on order {}", refund.id, refund.order_id);
        Ok(refund)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RefundStatus,
        admin_note: Option<&str>,
    ) -> Result<Refund, RepositoryError> {
        let refund = sqlx::query_as::<_, Refund>(&format!(
            "UPDATE refunds SET status = $2, admin_note = COALESCE($3, admin_note), \
             processed_at = CASE WHEN $2 = 'completed' THEN now() ELSE processed_at END, \
             updated_at = now() WHERE id = $1 RETURNING {REFUND_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(admin_note)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update refund {id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🔄 Refund {id} is now {status}");
        Ok(refund)
    }
}
