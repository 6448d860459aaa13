use crate::{
    abstract_trait::{Inbox, NotificationRepositoryTrait},
    config::ConnectionPool,
    domain::requests::CreateNotificationRecord,
    errors::RepositoryError,
    model::Notification,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

const NOTIFICATION_COLUMNS: &str =
    "id, audience, vendor_id, kind, title, message, is_read, extra_data, created_at";

/// `$1` audience, `$2` vendor id (NULL for the admin inbox).
const INBOX_FILTER: &str = "audience = $1 AND ($2::UUID IS NULL OR vendor_id = $2)";

fn inbox_params(inbox: Inbox) -> (&'static str, Option<Uuid>) {
    match inbox {
        Inbox::Admin => ("admin", None),
        Inbox::Vendor(vendor_id) => ("vendor", Some(vendor_id)),
    }
}

#[derive(Clone)]
pub struct NotificationRepository {
    db: ConnectionPool,
}

impl NotificationRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn create(
        &self,
        req: &CreateNotificationRecord,
    ) -> Result<Notification, RepositoryError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (id, audience, vendor_id, kind, title, message, extra_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(req.audience.as_str())
        .bind(req.vendor_id)
        .bind(req.kind.as_str())
        .bind(&req.title)
        .bind(&req.message)
        .bind(req.extra_data.as_ref())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to store notification '{}': {e:?}", req.title);
            RepositoryError::from(e)
        })?;

        info!("📨 Notification {} -> {}", notification.id, notification.audience);
        Ok(notification)
    }

    async fn create_many(
        &self,
        reqs: &[CreateNotificationRecord],
    ) -> Result<usize, RepositoryError> {
        let mut tx = self.db.begin().await?;

        for req in reqs {
            sqlx::query(
                "INSERT INTO notifications (id, audience, vendor_id, kind, title, message, extra_data) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(Uuid::new_v4())
            .bind(req.audience.as_str())
            .bind(req.vendor_id)
            .bind(req.kind.as_str())
            .bind(&req.title)
            .bind(&req.message)
            .bind(req.extra_data.as_ref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("📨 Delivered {} notifications", reqs.len());
        Ok(reqs.len())
    }

    async fn find_for_inbox(
        &self,
        inbox: Inbox,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let (audience, vendor_id) = inbox_params(inbox);

        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE {INBOX_FILTER} \
             ORDER BY created_at DESC, id LIMIT $3"
        ))
        .bind(audience)
        .bind(vendor_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch {inbox:?} inbox: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_sent_to_vendors(
        &self,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE audience = 'vendor' \
             ORDER BY created_at DESC, id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, RepositoryError> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn count_unread(&self, inbox: Inbox) -> Result<i64, RepositoryError> {
        let (audience, vendor_id) = inbox_params(inbox);

        sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM notifications WHERE {INBOX_FILTER} AND NOT is_read"
        ))
        .bind(audience)
        .bind(vendor_id)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn mark_read(&self, id: Uuid) -> Result<Notification, RepositoryError> {
        sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map_err(RepositoryError::from)
    }

    async fn mark_all_read(&self, inbox: Inbox) -> Result<u64, RepositoryError> {
        let (audience, vendor_id) = inbox_params(inbox);

        let result = sqlx::query(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE {INBOX_FILTER} AND NOT is_read"
        ))
        .bind(audience)
        .bind(vendor_id)
        .execute(&self.db)
        .await?;

        info!("📭 Marked {} notifications read in {inbox:?}", result.rows_affected());
        Ok(result.rows_affected())
    }
}
