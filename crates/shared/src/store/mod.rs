//! Client-side entity stores persisted under fixed keys of a JSON file.

mod catalog;
mod filter;
mod notification;
mod persisted;

pub use self::catalog::{
    CatalogState, CatalogStore, Identified, ProductState, ProductStore, VendorState, VendorStore,
};
pub use self::filter::{DEFAULT_MAX_PRICE, FILTER_STORAGE_KEY, FilterState, FilterStore, MAX_RATING};
pub use self::notification::{
    MAX_NOTIFICATIONS, NOTIFICATION_STORAGE_KEY, NewNotification, NotificationLevel,
    NotificationState, NotificationStore, StoredNotification,
};
pub use self::persisted::PersistedStore;
