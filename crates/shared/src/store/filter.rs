use super::persisted::PersistedStore;
use crate::{domain::requests::SortOrder, errors::StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FILTER_STORAGE_KEY: &str = "filter-storage";
/// Upper bound of the default price range, in paise.
pub const DEFAULT_MAX_PRICE: i64 = 100_000;
pub const MAX_RATING: f64 = 5.0;

/// Catalog browsing filters remembered between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub selected_categories: Vec<String>,
    pub price_range: (i64, i64),
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub search_query: String,
    pub in_stock_only: bool,
    pub min_rating: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_categories: Vec::new(),
            price_range: (0, DEFAULT_MAX_PRICE),
            sort_by: "name".to_string(),
            sort_order: SortOrder::Asc,
            search_query: String::new(),
            in_stock_only: false,
            min_rating: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct FilterStore {
    inner: PersistedStore<FilterState>,
}

impl FilterStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::open(path, FILTER_STORAGE_KEY)?,
        })
    }

    pub fn state(&self) -> &FilterState {
        self.inner.state()
    }

    /// Selects the category, or deselects it when already selected. Returns
    /// whether it is now selected.
    pub fn toggle_category(&mut self, category: &str) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            let categories = &mut state.selected_categories;
            match categories.iter().position(|c| c == category) {
                Some(index) => {
                    categories.remove(index);
                    false
                }
                None => {
                    categories.push(category.to_string());
                    true
                }
            }
        })
    }

    /// Bounds given in either order are stored low to high.
    pub fn set_price_range(&mut self, min: i64, max: i64) -> Result<(), StoreError> {
        let range = if min <= max { (min, max) } else { (max, min) };
        self.inner.mutate(|state| state.price_range = range)
    }

    pub fn set_sort_by(&mut self, sort_by: impl Into<String>) -> Result<(), StoreError> {
        let sort_by = sort_by.into();
        self.inner.mutate(|state| state.sort_by = sort_by)
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.sort_order = sort_order)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> Result<(), StoreError> {
        let query = query.into();
        self.inner.mutate(|state| state.search_query = query)
    }

    pub fn set_in_stock_only(&mut self, in_stock_only: bool) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.in_stock_only = in_stock_only)
    }

    /// Clamped to `0..=5`.
    pub fn set_min_rating(&mut self, rating: f64) -> Result<(), StoreError> {
        let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, MAX_RATING) };
        self.inner.mutate(|state| state.min_rating = rating)
    }

    pub fn clear_all_categories(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.selected_categories.clear())
    }

    pub fn reset_filters(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| *state = FilterState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilterStore::open(dir.path().join("client.json")).unwrap();

        let state = store.state();
        assert!(state.selected_categories.is_empty());
        assert_eq!(state.price_range, (0, DEFAULT_MAX_PRICE));
        assert_eq!(state.sort_by, "name");
        assert_eq!(state.sort_order, SortOrder::Asc);
        assert_eq!(state.min_rating, 0.0);
    }

    #[test]
    fn toggling_a_category_twice_deselects_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilterStore::open(dir.path().join("client.json")).unwrap();

        assert!(store.toggle_category("fruits").unwrap());
        assert!(store.toggle_category("dairy").unwrap());
        assert!(!store.toggle_category("fruits").unwrap());
        assert_eq!(store.state().selected_categories, vec!["dairy".to_string()]);

        store.clear_all_categories().unwrap();
        assert!(store.state().selected_categories.is_empty());
    }

    #[test]
    fn price_range_is_ordered_and_rating_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilterStore::open(dir.path().join("client.json")).unwrap();

        store.set_price_range(50_000, 10_000).unwrap();
        assert_eq!(store.state().price_range, (10_000, 50_000));

        store.set_min_rating(7.5).unwrap();
        assert_eq!(store.state().min_rating, MAX_RATING);
        store.set_min_rating(-1.0).unwrap();
        assert_eq!(store.state().min_rating, 0.0);
    }

    #[test]
    fn filters_survive_reopen_until_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");

        let mut store = FilterStore::open(&path).unwrap();
        store.toggle_category("vegetables").unwrap();
        store.set_sort_by("price").unwrap();
        store.set_sort_order(SortOrder::Desc).unwrap();
        store.set_search_query("organic").unwrap();
        store.set_in_stock_only(true).unwrap();

        let mut reopened = FilterStore::open(&path).unwrap();
        assert_eq!(reopened.state(), store.state());
        assert_eq!(reopened.state().search_query, "organic");

        reopened.reset_filters().unwrap();
        assert_eq!(
            FilterStore::open(&path).unwrap().state(),
            &FilterState::default()
        );
    }

    #[test]
    fn stored_under_its_own_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        let mut store = FilterStore::open(&path).unwrap();
        store.set_in_stock_only(true).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["filter-storage"]["state"]["in_stock_only"], true);
        assert_eq!(raw["filter-storage"]["state"]["sort_order"], "asc");
    }
}
