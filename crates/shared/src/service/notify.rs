use crate::{
    abstract_trait::DynNotificationRepository, domain::requests::CreateNotificationRecord,
};
use tracing::warn;

/// Stores a side-effect notification. A failure is logged and never fails the
/// operation that triggered it.
pub(crate) async fn deliver(repo: &DynNotificationRepository, record: CreateNotificationRecord) {
    if let Err(err) = repo.create(&record).await {
        warn!("⚠️ Failed to deliver notification '{}': {err}", record.title);
    }
}

pub(crate) async fn deliver_many(
    repo: &DynNotificationRepository,
    records: Vec<CreateNotificationRecord>,
) {
    if records.is_empty() {
        return;
    }
    if let Err(err) = repo.create_many(&records).await {
        warn!("⚠️ Failed to deliver {} notifications: {err}", records.len());
    }
}
