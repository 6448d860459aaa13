use crate::{
    abstract_trait::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    domain::requests::{
        CreateProductRecord, ProductListFilter, ProductSort, UpdateProductRequest,
    },
    errors::RepositoryError,
    model::{Product, ProductStatus, VendorStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use uuid::Uuid;

use super::{MemoryDatabase, contains_ignore_case, newest_first, page, search_term};

fn sort_products(products: &mut [Product], sort: ProductSort) {
    match sort {
        ProductSort::New => {}
        ProductSort::Popular => products.sort_by_key(|p| Reverse(p.sales)),
        ProductSort::PriceLow => products.sort_by_key(|p| p.price),
        ProductSort::PriceHigh => products.sort_by_key(|p| Reverse(p.price)),
        ProductSort::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryDatabase {
    async fn find_all(
        &self,
        filter: &ProductListFilter,
    ) -> Result<(Vec<Product>, i64), RepositoryError> {
        let category = filter.category.as_deref().filter(|c| !c.trim().is_empty());
        let search = search_term(filter.search.as_deref());
        let tables = self.tables.read().await;

        let vendor_approved = |vendor_id: Uuid| {
            tables
                .vendors
                .iter()
                .any(|v| v.id == vendor_id && v.status == VendorStatus::Approved)
        };

        let mut matched = newest_first(
            tables
                .products
                .iter()
                .filter(|p| filter.status.is_none_or(|s| p.status == s))
                .filter(|p| !filter.only_approved_vendors || vendor_approved(p.vendor_id))
                .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
                .filter(|p| !filter.on_sale || p.discount > 0)
                .filter(|p| {
                    search.is_none_or(|s| {
                        contains_ignore_case(&p.name, s)
                            || p.description
                                .as_deref()
                                .is_some_and(|d| contains_ignore_case(d, s))
                    })
                })
                .filter(|p| filter.vendor_id.is_none_or(|id| p.vendor_id == id))
                .cloned(),
            |p| p.created_at,
        );
        sort_products(&mut matched, filter.sort);

        let total = matched.len() as i64;
        Ok((page(matched, filter.limit, filter.offset), total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.tables.read().await.products.len() as i64)
    }

    async fn count_by_vendor(&self, vendor_id: Uuid) -> Result<i64, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().filter(|p| p.vendor_id == vendor_id).count() as i64)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryDatabase {
    async fn create_product(
        &self,
        req: &CreateProductRecord,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.vendors.iter().any(|v| v.id == req.vendor_id) {
            return Err(RepositoryError::ForeignKey("products_vendor_id_fkey".into()));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            vendor_id: req.vendor_id,
            name: req.name.clone(),
            description: req.description.clone(),
            price: req.price,
            discount: req.discount,
            category: req.category.clone(),
            images: req.images.clone(),
            stock: req.stock,
            sku: req.sku.clone(),
            status: ProductStatus::Pending,
            rejection_reason: None,
            approved_at: None,
            rating: 0.0,
            review_count: 0,
            sales: 0,
            tags: req.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(description) = &req.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(discount) = req.discount {
            product.discount = discount;
        }
        if let Some(category) = &req.category {
            product.category = category.clone();
        }
        if let Some(images) = &req.images {
            product.images = images.clone();
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        if let Some(sku) = &req.sku {
            product.sku = Some(sku.clone());
        }
        if let Some(tags) = &req.tags {
            product.tags = tags.clone();
        }
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ProductStatus,
        rejection_reason: Option<String>,
        approved_at: Option<DateTime<Utc>>,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        product.status = status;
        product.rejection_reason = rejection_reason;
        product.approved_at = approved_at;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn update_rating(
        &self,
        id: Uuid,
        rating: f64,
        review_count: i32,
    ) -> Result<Product, RepositoryError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        product.rating = rating;
        product.review_count = review_count;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.order_items.iter().any(|i| i.product_id == id) {
            return Err(RepositoryError::ForeignKey("order_items_product_id_fkey".into()));
        }

        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);

        if tables.products.len() == before {
            return Err(RepositoryError::NotFound);
        }

        // Matches ON DELETE CASCADE on cart_items, reviews and wishlist_items.
        tables.cart_items.retain(|c| c.product_id != id);
        tables.reviews.retain(|r| r.product_id != id);
        tables.wishlist_items.retain(|w| w.product_id != id);
        Ok(())
    }
}
