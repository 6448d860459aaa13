//! In-memory storage backend.
//!
//! Every repository trait is implemented on [`MemoryDatabase`], so one
//! `Arc<MemoryDatabase>` can be handed out as each `Dyn*Repository`. All
//! tables sit behind a single lock, which keeps multi-table writes such as
//! order creation atomic.

mod cart;
mod category;
mod notification;
mod order;
mod product;
mod refund;
mod review;
mod user;
mod vendor;
mod wishlist;

use crate::model::{
    CartItem, Category, Notification, Order, OrderItem, Product, Refund, Review, User, Vendor,
    WishlistItem,
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Default)]
pub(crate) struct Tables {
    pub users: Vec<User>,
    pub vendors: Vec<Vendor>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub cart_items: Vec<CartItem>,
    pub reviews: Vec<Review>,
    pub categories: Vec<Category>,
    pub notifications: Vec<Notification>,
    pub wishlist_items: Vec<WishlistItem>,
    pub refunds: Vec<Refund>,
}

#[derive(Default)]
pub struct MemoryDatabase {
    tables: RwLock<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first. Rows sharing a timestamp keep reverse insertion order.
pub(crate) fn newest_first<T: Clone>(
    rows: impl DoubleEndedIterator<Item = T>,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

pub(crate) fn page<T>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Trimmed, non-empty search term.
pub(crate) fn search_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            OrderCommandRepositoryTrait, ProductCommandRepositoryTrait,
            ProductQueryRepositoryTrait, UserCommandRepositoryTrait, VendorCommandRepositoryTrait,
        },
        domain::requests::{
            CreateOrderItemRecord, CreateOrderRecord, CreateProductRecord, CreateUserRecord,
            CreateVendorRecord,
        },
        errors::RepositoryError,
        model::{PaymentMethod, Role, ShippingAddress},
    };
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn user(email: &str) -> CreateUserRecord {
        CreateUserRecord {
            name: "Asha".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        }
    }

    fn vendor(user_id: Uuid, store_name: &str) -> CreateVendorRecord {
        CreateVendorRecord {
            user_id,
            store_name: store_name.to_string(),
            store_description: None,
            contact_email: "shop@example.com".to_string(),
            phone: None,
            city: None,
            state: None,
            categories: vec!["fruits".to_string()],
        }
    }

    fn product(vendor_id: Uuid, stock: i32) -> CreateProductRecord {
        CreateProductRecord {
            vendor_id,
            name: "Alphonso Mango".to_string(),
            description: None,
            price: 50_000,
            discount: 0,
            category: "fruits".to_string(),
            images: vec![],
            stock,
            sku: None,
            tags: vec![],
        }
    }

    fn order(user_id: Uuid, vendor_id: Uuid, lines: &[(Uuid, i32)]) -> CreateOrderRecord {
        CreateOrderRecord {
            user_id,
            total_amount: 0,
            discount_amount: 0,
            tax_amount: 0,
            final_amount: 0,
            shipping_address: ShippingAddress {
                street: "1 MG Road".to_string(),
                city: "Pune".to_string(),
                state: "MH".to_string(),
                zip_code: "411001".to_string(),
                country: "India".to_string(),
            },
            payment_method: PaymentMethod::Upi,
            items: lines
                .iter()
                .map(|(product_id, quantity)| CreateOrderItemRecord {
                    product_id: *product_id,
                    vendor_id,
                    quantity: *quantity,
                    price: 50_000,
                    total: 50_000 * i64::from(*quantity),
                })
                .collect(),
        }
    }

    async fn seeded(stock: i32) -> (MemoryDatabase, Uuid, Uuid, Uuid) {
        let db = MemoryDatabase::new();
        let owner = db.create_user(&user("owner@example.com")).await.unwrap();
        let shop = db.create_vendor(&vendor(owner.id, "Fresh Farm")).await.unwrap();
        let item = db.create_product(&product(shop.id, stock)).await.unwrap();
        (db, owner.id, shop.id, item.id)
    }

    #[tokio::test]
    async fn email_is_unique_ignoring_case() {
        let db = MemoryDatabase::new();
        db.create_user(&user("asha@example.com")).await.unwrap();

        assert_matches!(
            db.create_user(&user("ASHA@example.com")).await,
            Err(RepositoryError::AlreadyExists(_))
        );
    }

    #[tokio::test]
    async fn one_vendor_profile_per_user_and_unique_store_names() {
        let (db, owner, _, _) = seeded(1).await;
        let other = db.create_user(&user("other@example.com")).await.unwrap();

        assert_matches!(
            db.create_vendor(&vendor(owner, "Another Shop")).await,
            Err(RepositoryError::AlreadyExists(_))
        );
        assert_matches!(
            db.create_vendor(&vendor(other.id, "fresh farm")).await,
            Err(RepositoryError::AlreadyExists(_))
        );
    }

    #[tokio::test]
    async fn product_requires_existing_vendor() {
        let db = MemoryDatabase::new();
        assert_matches!(
            db.create_product(&product(Uuid::new_v4(), 1)).await,
            Err(RepositoryError::ForeignKey(_))
        );
    }

    #[tokio::test]
    async fn order_moves_stock_into_sales() {
        let (db, buyer, shop, item) = seeded(5).await;

        let (created, lines) = db
            .create_order(&order(buyer, shop, &[(item, 2)]))
            .await
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].order_id, created.id);

        let stored = db.find_by_id(item).await.unwrap().unwrap();
        assert_eq!(stored.stock, 3);
        assert_eq!(stored.sales, 2);
    }

    #[tokio::test]
    async fn short_stock_rejects_whole_order() {
        let (db, buyer, shop, item) = seeded(3).await;

        // Split lines for the same product are summed before the check.
        assert_matches!(
            db.create_order(&order(buyer, shop, &[(item, 2), (item, 2)]))
                .await,
            Err(RepositoryError::Conflict(_))
        );

        let stored = db.find_by_id(item).await.unwrap().unwrap();
        assert_eq!(stored.stock, 3);
        assert_eq!(stored.sales, 0);
        assert!(db.tables.read().await.orders.is_empty());
    }

    #[tokio::test]
    async fn ordered_products_cannot_be_deleted() {
        let (db, buyer, shop, item) = seeded(5).await;
        db.create_order(&order(buyer, shop, &[(item, 1)]))
            .await
            .unwrap();

        assert_matches!(
            db.delete_product(item).await,
            Err(RepositoryError::ForeignKey(_))
        );
    }
}
