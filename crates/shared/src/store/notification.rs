use super::persisted::PersistedStore;
use crate::errors::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

pub const NOTIFICATION_STORAGE_KEY: &str = "notification-storage";
pub const MAX_NOTIFICATIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredNotification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub level: NotificationLevel,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotificationState {
    #[serde(default)]
    pub notifications: Vec<StoredNotification>,
}

/// Toast-style notifications, newest first, keeping the latest ten.
#[derive(Debug)]
pub struct NotificationStore {
    inner: PersistedStore<NotificationState>,
}

impl NotificationStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::open(path, NOTIFICATION_STORAGE_KEY)?,
        })
    }

    pub fn notifications(&self) -> &[StoredNotification] {
        &self.inner.state().notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications().iter().filter(|n| !n.read).count()
    }

    pub fn add(&mut self, notification: NewNotification) -> Result<StoredNotification, StoreError> {
        let stored = StoredNotification {
            id: Uuid::new_v4(),
            title: notification.title,
            message: notification.message,
            level: notification.level,
            timestamp: Utc::now(),
            read: false,
        };

        let created = stored.clone();
        self.inner.mutate(move |state| {
            state.notifications.truncate(MAX_NOTIFICATIONS - 1);
            state.notifications.insert(0, stored);
        })?;

        Ok(created)
    }

    pub fn mark_as_read(&mut self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            match state.notifications.iter_mut().find(|n| n.id == id) {
                Some(n) => {
                    n.read = true;
                    true
                }
                None => false,
            }
        })
    }

    pub fn mark_all_as_read(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| {
            state.notifications.iter_mut().for_each(|n| n.read = true);
        })
    }

    pub fn remove(&mut self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            let before = state.notifications.len();
            state.notifications.retain(|n| n.id != id);
            state.notifications.len() != before
        })
    }

    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.notifications.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str) -> NewNotification {
        NewNotification {
            title: title.to_string(),
            message: "Order placed".to_string(),
            level: NotificationLevel::Success,
        }
    }

    #[test]
    fn keeps_only_latest_ten_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NotificationStore::open(dir.path().join("client.json")).unwrap();

        for i in 0..12 {
            store.add(note(&format!("n{i}"))).unwrap();
        }

        let titles: Vec<_> = store
            .notifications()
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles.len(), MAX_NOTIFICATIONS);
        assert_eq!(titles.first(), Some(&"n11"));
        assert_eq!(titles.last(), Some(&"n2"));
    }

    #[test]
    fn read_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        let mut store = NotificationStore::open(&path).unwrap();

        let first = store.add(note("a")).unwrap();
        store.add(note("b")).unwrap();
        store.add(note("c")).unwrap();
        assert_eq!(store.unread_count(), 3);

        assert!(store.mark_as_read(first.id).unwrap());
        assert!(!store.mark_as_read(Uuid::new_v4()).unwrap());
        assert_eq!(store.unread_count(), 2);

        store.mark_all_as_read().unwrap();
        assert_eq!(NotificationStore::open(&path).unwrap().unread_count(), 0);
    }

    #[test]
    fn remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = NotificationStore::open(dir.path().join("client.json")).unwrap();

        let kept = store.add(note("keep")).unwrap();
        let dropped = store.add(note("drop")).unwrap();

        assert!(store.remove(dropped.id).unwrap());
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].id, kept.id);

        store.clear_all().unwrap();
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn serialises_level_as_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        let mut store = NotificationStore::open(&path).unwrap();
        store.add(note("x")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let entry = &raw["notification-storage"]["state"]["notifications"][0];
        assert_eq!(entry["type"], "success");
        assert_eq!(entry["read"], false);
    }
}
