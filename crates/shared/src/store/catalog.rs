use super::persisted::PersistedStore;
use crate::{
    domain::responses::{ProductResponse, VendorResponse},
    errors::StoreError,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;
use uuid::Uuid;

pub trait Identified {
    fn id(&self) -> Uuid;
}

impl Identified for ProductResponse {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for VendorResponse {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// A list of entities plus the ids the user marked as favourite.
pub trait CatalogState: Serialize + DeserializeOwned + Default + Clone {
    type Item: Identified;

    const STORAGE_KEY: &'static str;

    fn items(&self) -> &[Self::Item];
    fn items_mut(&mut self) -> &mut Vec<Self::Item>;
    fn favorites(&self) -> &[Uuid];
    fn favorites_mut(&mut self) -> &mut Vec<Uuid>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProductState {
    #[serde(default)]
    pub products: Vec<ProductResponse>,
    #[serde(default)]
    pub favorites: Vec<Uuid>,
}

impl CatalogState for ProductState {
    type Item = ProductResponse;

    const STORAGE_KEY: &'static str = "product-storage";

    fn items(&self) -> &[ProductResponse] {
        &self.products
    }

    fn items_mut(&mut self) -> &mut Vec<ProductResponse> {
        &mut self.products
    }

    fn favorites(&self) -> &[Uuid] {
        &self.favorites
    }

    fn favorites_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.favorites
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VendorState {
    #[serde(default)]
    pub vendors: Vec<VendorResponse>,
    #[serde(default)]
    pub favorite_vendors: Vec<Uuid>,
}

impl CatalogState for VendorState {
    type Item = VendorResponse;

    const STORAGE_KEY: &'static str = "vendor-storage";

    fn items(&self) -> &[VendorResponse] {
        &self.vendors
    }

    fn items_mut(&mut self) -> &mut Vec<VendorResponse> {
        &mut self.vendors
    }

    fn favorites(&self) -> &[Uuid] {
        &self.favorite_vendors
    }

    fn favorites_mut(&mut self) -> &mut Vec<Uuid> {
        &mut self.favorite_vendors
    }
}

pub type ProductStore = CatalogStore<ProductState>;
pub type VendorStore = CatalogStore<VendorState>;

#[derive(Debug)]
pub struct CatalogStore<S> {
    inner: PersistedStore<S>,
}

impl<S: CatalogState> CatalogStore<S> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: PersistedStore::open(path, S::STORAGE_KEY)?,
        })
    }

    pub fn items(&self) -> &[S::Item] {
        self.inner.state().items()
    }

    pub fn favorites(&self) -> &[Uuid] {
        self.inner.state().favorites()
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&S::Item> {
        self.items().iter().find(|item| item.id() == id)
    }

    pub fn is_favorite(&self, id: Uuid) -> bool {
        self.favorites().contains(&id)
    }

    pub fn add(&mut self, item: S::Item) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.items_mut().push(item))
    }

    /// Drops the entity and its favourite mark. Returns whether it was present.
    pub fn remove(&mut self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            let items = state.items_mut();
            let before = items.len();
            items.retain(|item| item.id() != id);
            let removed = items.len() != before;

            state.favorites_mut().retain(|fav| *fav != id);
            removed
        })
    }

    /// Applies `patch` to the entity with `id`. Returns whether it was present.
    pub fn update(
        &mut self,
        id: Uuid,
        patch: impl FnOnce(&mut S::Item),
    ) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            match state.items_mut().iter_mut().find(|item| item.id() == id) {
                Some(item) => {
                    patch(item);
                    true
                }
                None => false,
            }
        })
    }

    pub fn set_items(&mut self, items: Vec<S::Item>) -> Result<(), StoreError> {
        self.inner.mutate(|state| *state.items_mut() = items)
    }

    /// Flips the favourite mark and returns the new value.
    pub fn toggle_favorite(&mut self, id: Uuid) -> Result<bool, StoreError> {
        self.inner.mutate(|state| {
            let favorites = state.favorites_mut();
            match favorites.iter().position(|fav| *fav == id) {
                Some(index) => {
                    favorites.remove(index);
                    false
                }
                None => {
                    favorites.push(id);
                    true
                }
            }
        })
    }

    /// Empties the entity list; favourites are kept.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.mutate(|state| state.items_mut().clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductStatus;
    use chrono::Utc;

    fn product(name: &str) -> ProductResponse {
        let now = Utc::now();
        ProductResponse {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price: 10_000,
            discount: 10,
            discounted_price: 9_000,
            category: "fruits".to_string(),
            images: vec![],
            stock: 5,
            sku: None,
            status: ProductStatus::Approved,
            rejection_reason: None,
            approved_at: None,
            rating: 0.0,
            review_count: 0,
            sales: 0,
            tags: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn remove_also_drops_favorite() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProductStore::open(dir.path().join("client.json")).unwrap();

        let mango = product("Mango");
        let id = mango.id;
        store.add(mango).unwrap();
        assert!(store.toggle_favorite(id).unwrap());
        assert!(store.is_favorite(id));

        assert!(store.remove(id).unwrap());
        assert!(store.get_by_id(id).is_none());
        assert!(!store.is_favorite(id));
        assert!(!store.remove(id).unwrap());
    }

    #[test]
    fn toggle_favorite_twice_unmarks() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProductStore::open(dir.path().join("client.json")).unwrap();
        let id = Uuid::new_v4();

        assert!(store.toggle_favorite(id).unwrap());
        assert!(!store.toggle_favorite(id).unwrap());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn update_patches_in_place_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        let mut store = ProductStore::open(&path).unwrap();

        let apple = product("Apple");
        let id = apple.id;
        store.set_items(vec![apple, product("Pear")]).unwrap();

        assert!(store.update(id, |p| p.stock = 42).unwrap());
        assert!(!store.update(Uuid::new_v4(), |p| p.stock = 1).unwrap());

        let reopened = ProductStore::open(&path).unwrap();
        assert_eq!(reopened.items().len(), 2);
        assert_eq!(reopened.get_by_id(id).map(|p| p.stock), Some(42));
    }

    #[test]
    fn clear_keeps_favorites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProductStore::open(dir.path().join("client.json")).unwrap();

        let kiwi = product("Kiwi");
        let id = kiwi.id;
        store.add(kiwi).unwrap();
        store.toggle_favorite(id).unwrap();
        store.clear().unwrap();

        assert!(store.items().is_empty());
        assert!(store.is_favorite(id));
    }

    #[test]
    fn product_and_vendor_stores_share_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");

        let mut products = ProductStore::open(&path).unwrap();
        let mut vendors = VendorStore::open(&path).unwrap();
        let vendor_id = Uuid::new_v4();
        products.add(product("Banana")).unwrap();
        vendors.toggle_favorite(vendor_id).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["product-storage"]["state"]["products"][0]["name"], "Banana");
        assert_eq!(
            raw["vendor-storage"]["state"]["favorite_vendors"][0],
            vendor_id.to_string()
        );
    }
}
