use crate::{
    abstract_trait::{Inbox, NotificationRepositoryTrait},
    domain::requests::CreateNotificationRecord,
    errors::RepositoryError,
    model::{Audience, Notification},
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{MemoryDatabase, Tables, newest_first};

fn insert(tables: &mut Tables, req: &CreateNotificationRecord) -> Notification {
    let notification = Notification {
        id: Uuid::new_v4(),
        audience: req.audience,
        vendor_id: req.vendor_id,
        kind: req.kind,
        title: req.title.clone(),
        message: req.message.clone(),
        is_read: false,
        extra_data: req.extra_data.clone(),
        created_at: Utc::now(),
    };
    tables.notifications.push(notification.clone());
    notification
}

#[async_trait]
impl NotificationRepositoryTrait for MemoryDatabase {
    async fn create(
        &self,
        req: &CreateNotificationRecord,
    ) -> Result<Notification, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(insert(&mut tables, req))
    }

    async fn create_many(
        &self,
        reqs: &[CreateNotificationRecord],
    ) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.write().await;
        for req in reqs {
            insert(&mut tables, req);
        }
        Ok(reqs.len())
    }

    async fn find_for_inbox(
        &self,
        inbox: Inbox,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut found = newest_first(
            tables
                .notifications
                .iter()
                .filter(|n| inbox.contains(n))
                .cloned(),
            |n| n.created_at,
        );
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    async fn find_sent_to_vendors(
        &self,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut found = newest_first(
            tables
                .notifications
                .iter()
                .filter(|n| n.audience == Audience::Vendor)
                .cloned(),
            |n| n.created_at,
        );
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn count_unread(&self, inbox: Inbox) -> Result<i64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| inbox.contains(n) && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid) -> Result<Notification, RepositoryError> {
        let mut tables = self.tables.write().await;
        let notification = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(RepositoryError::NotFound)?;

        notification.is_read = true;
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, inbox: Inbox) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let mut marked = 0;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|n| inbox.contains(n) && !n.is_read)
        {
            notification.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }
}
