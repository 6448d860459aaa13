use crate::{
    abstract_trait::{
        DynCartRepository, DynNotificationRepository, DynOrderCommandRepository,
        DynOrderQueryRepository, DynProductQueryRepository, DynVendorQueryRepository,
        OrderServiceTrait,
    },
    domain::{
        Identity,
        requests::{
            CheckoutRequest, CreateNotificationRecord, CreateOrderItemRecord, CreateOrderRecord,
            CreateOrderRequest, FindAllOrders, OrderItemRequest, UpdateOrderRequest, page_bounds,
        },
        responses::{ApiResponse, ApiResponsePagination, OrderResponse, Pagination},
    },
    errors::{RepositoryError, ServiceError},
    model::{
        NotificationKind, Order, OrderItem, PaymentMethod, Product, ProductStatus, Role,
        ShippingAddress, Vendor, VendorStatus,
    },
    service::{notify, vendor::approved_vendor_of},
    utils::{Method, ServiceTelemetry, format_amount},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};
use uuid::Uuid;

const ORDER_NOT_FOUND: &str = "Order not found";
const TAX_AMOUNT: i64 = 0;
const QUANTITY_TOO_LARGE: &str = "Quantity is too large";
const AMOUNT_TOO_LARGE: &str = "Order amount is too large";

fn too_large(message: &str) -> ServiceError {
    ServiceError::BadRequest(message.into())
}

/// A product can be bought when it and its vendor are both approved.
pub(crate) fn ensure_purchasable(
    product: &Product,
    vendor: Option<&Vendor>,
) -> Result<(), ServiceError> {
    let vendor_ok = vendor.is_some_and(|v| v.status == VendorStatus::Approved);

    if product.status != ProductStatus::Approved || !vendor_ok {
        return Err(ServiceError::BadRequest(format!(
            "Product {} is not available for purchase",
            product.name
        )));
    }

    Ok(())
}

/// Sums quantities of repeated products, keeping first-seen order.
fn merge_items(items: &[OrderItemRequest]) -> Result<Vec<(Uuid, i32)>, ServiceError> {
    let mut merged: Vec<(Uuid, i32)> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, quantity)) => {
                *quantity = quantity
                    .checked_add(item.quantity)
                    .ok_or_else(|| too_large(QUANTITY_TOO_LARGE))?;
            }
            None => merged.push((item.product_id, item.quantity)),
        }
    }
    Ok(merged)
}

/// Adds one line to the running totals, rejecting amounts that overflow.
fn add_line(
    record: &mut CreateOrderRecord,
    product: &Product,
    quantity: i32,
) -> Result<(), ServiceError> {
    let unit_price = product.unit_price();
    let quantity_minor = i64::from(quantity);

    let gross = product
        .price
        .checked_mul(quantity_minor)
        .ok_or_else(|| too_large(AMOUNT_TOO_LARGE))?;
    let total = unit_price
        .checked_mul(quantity_minor)
        .ok_or_else(|| too_large(AMOUNT_TOO_LARGE))?;

    record.total_amount = record
        .total_amount
        .checked_add(gross)
        .ok_or_else(|| too_large(AMOUNT_TOO_LARGE))?;
    record.discount_amount += gross - total;
    record.items.push(CreateOrderItemRecord {
        product_id: product.id,
        vendor_id: product.vendor_id,
        quantity,
        price: unit_price,
        total,
    });

    Ok(())
}

fn group_items(orders: Vec<Order>, items: Vec<OrderItem>) -> Vec<OrderResponse> {
    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderResponse::from_parts(order, items)
        })
        .collect()
}

pub struct OrderServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub vendor_query: DynVendorQueryRepository,
    pub cart: DynCartRepository,
    pub notifications: DynNotificationRepository,
}

pub struct OrderService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    product_query: DynProductQueryRepository,
    vendor_query: DynVendorQueryRepository,
    cart: DynCartRepository,
    notifications: DynNotificationRepository,
    telemetry: ServiceTelemetry,
}

impl OrderService {
    pub fn new(deps: OrderServiceDeps, registry: &mut Registry) -> Self {
        let OrderServiceDeps {
            query,
            command,
            product_query,
            vendor_query,
            cart,
            notifications,
        } = deps;

        Self {
            query,
            command,
            product_query,
            vendor_query,
            cart,
            notifications,
            telemetry: ServiceTelemetry::new("order-service", registry),
        }
    }

    async fn build_record(
        &self,
        actor: &Identity,
        items: &[OrderItemRequest],
        shipping_address: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<CreateOrderRecord, ServiceError> {
        let merged = merge_items(items)?;
        let ids: Vec<Uuid> = merged.iter().map(|(id, _)| *id).collect();

        let products: HashMap<Uuid, Product> = self
            .product_query
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let vendor_ids: Vec<Uuid> = products.values().map(|p| p.vendor_id).collect();
        let vendors: HashMap<Uuid, Vendor> = self
            .vendor_query
            .find_by_ids(&vendor_ids)
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        let mut record = CreateOrderRecord {
            user_id: actor.user_id,
            total_amount: 0,
            discount_amount: 0,
            tax_amount: TAX_AMOUNT,
            final_amount: 0,
            shipping_address: shipping_address.clone(),
            payment_method,
            items: Vec::with_capacity(merged.len()),
        };

        for (product_id, quantity) in merged {
            let product = products.get(&product_id).ok_or_else(|| {
                ServiceError::NotFound(format!("Product {product_id} not found"))
            })?;

            ensure_purchasable(product, vendors.get(&product.vendor_id))?;

            if product.stock < quantity {
                return Err(ServiceError::BadRequest(format!(
                    "Insufficient stock for {}",
                    product.name
                )));
            }

            add_line(&mut record, product, quantity)?;
        }

        record.final_amount = record.total_amount - record.discount_amount + record.tax_amount;
        Ok(record)
    }

    async fn place(&self, record: CreateOrderRecord) -> Result<OrderResponse, ServiceError> {
        let (order, items) = self
            .command
            .create_order(&record)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => ServiceError::BadRequest("Insufficient stock".into()),
                other => ServiceError::Repo(other),
            })?;

        let amount = format_amount(order.final_amount);
        let mut notices = vec![
            CreateNotificationRecord::for_admin(
                NotificationKind::NewOrder,
                "New order placed",
                format!("Order {} was placed for {amount}", order.id),
            )
            .with_extra(json!({ "order_id": order.id })),
        ];

        let vendor_ids: BTreeSet<Uuid> = items.iter().map(|i| i.vendor_id).collect();
        for vendor_id in vendor_ids {
            let units: i32 = items
                .iter()
                .filter(|i| i.vendor_id == vendor_id)
                .map(|i| i.quantity)
                .sum();
            notices.push(
                CreateNotificationRecord::for_vendor(
                    vendor_id,
                    NotificationKind::NewOrder,
                    "New order received",
                    format!("You have a new order {} with {units} item(s)", order.id),
                )
                .with_extra(json!({ "order_id": order.id })),
            );
        }

        notify::deliver_many(&self.notifications, notices).await;

        Ok(OrderResponse::from_parts(order, items))
    }

    async fn do_checkout(
        &self,
        actor: &Identity,
        req: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError> {
        let cart = self.cart.find_by_user(actor.user_id).await?;
        if cart.is_empty() {
            return Err(ServiceError::BadRequest("Cart is empty".into()));
        }

        let items: Vec<OrderItemRequest> = cart
            .iter()
            .map(|line| OrderItemRequest {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect();

        let record = self
            .build_record(actor, &items, &req.shipping_address, req.payment_method)
            .await?;
        let order = self.place(record).await?;

        // The order is committed; a stale cart must not turn it into an error.
        if let Err(err) = self.cart.clear(actor.user_id).await {
            warn!("⚠️ Order {} placed but cart of {} not cleared: {err}", order.id, actor.email);
        }
        Ok(order)
    }

    async fn paginate(
        &self,
        user_id: Option<Uuid>,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (page, limit, _) = page_bounds(req.page, req.limit);
        let (orders, total) = self.query.find_all(user_id, req).await?;

        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let items = self.query.find_items(&ids).await?;

        Ok(ApiResponsePagination::new(
            group_items(orders, items),
            Pagination::new(page, limit, total),
        ))
    }

    /// Whether an approved vendor caller has at least one line in the order.
    async fn vendor_has_items(
        &self,
        actor: &Identity,
        items: &[OrderItem],
    ) -> Result<bool, ServiceError> {
        if actor.role != Role::Vendor {
            return Ok(false);
        }

        Ok(match self.vendor_query.find_by_user_id(actor.user_id).await? {
            Some(vendor) if vendor.status == VendorStatus::Approved => {
                items.iter().any(|i| i.vendor_id == vendor.id)
            }
            _ => false,
        })
    }

    async fn load(&self, id: Uuid) -> Result<(Order, Vec<OrderItem>), ServiceError> {
        let order = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(ORDER_NOT_FOUND.into()))?;
        let items = self.query.find_items(&[id]).await?;
        Ok((order, items))
    }
}

#[async_trait]
impl OrderServiceTrait for OrderService {
    async fn create(
        &self,
        actor: &Identity,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🛒 New order from {} with {} lines", actor.email, req.items.len());

        let tracing_ctx = self.telemetry.start(
            "create_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", actor.user_id.to_string()),
                KeyValue::new("order.lines", req.items.len() as i64),
            ],
        );

        let result = async {
            let record = self
                .build_record(actor, &req.items, &req.shipping_address, req.payment_method)
                .await?;
            self.place(record).await
        }
        .await;

        let order = self
            .telemetry
            .finish(&tracing_ctx, Method::Post, "Order placed", result)?;

        Ok(ApiResponse::with_message("Order placed successfully", order))
    }

    async fn checkout(
        &self,
        actor: &Identity,
        req: &CheckoutRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("💳 Checkout for {}", actor.email);

        let tracing_ctx = self.telemetry.start(
            "checkout",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let order = self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Checkout completed",
            self.do_checkout(actor, req).await,
        )?;

        Ok(ApiResponse::with_message("Order placed successfully", order))
    }

    async fn find_mine(
        &self,
        actor: &Identity,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "find_my_orders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Orders fetched",
            self.paginate(Some(actor.user_id), req).await,
        )
    }

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let tracing_ctx = self
            .telemetry
            .start("find_all_orders", vec![KeyValue::new("component", "order")]);

        self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "All orders fetched",
            self.paginate(None, req).await,
        )
    }

    async fn find_for_vendor(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        let vendor = approved_vendor_of(&self.vendor_query, actor).await?;

        let orders = self.query.find_by_vendor(vendor.id).await?;
        let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        // Vendors only see their own lines.
        let items: Vec<OrderItem> = self
            .query
            .find_items(&ids)
            .await?
            .into_iter()
            .filter(|i| i.vendor_id == vendor.id)
            .collect();

        Ok(ApiResponse::success(group_items(orders, items)))
    }

    async fn find_by_id(
        &self,
        actor: &Identity,
        id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let (order, items) = self.load(id).await?;

        let allowed = actor.is_admin()
            || order.user_id == actor.user_id
            || self.vendor_has_items(actor, &items).await?;

        if !allowed {
            return Err(ServiceError::Forbidden("Access denied".into()));
        }

        Ok(ApiResponse::success(OrderResponse::from_parts(order, items)))
    }

    async fn update(
        &self,
        actor: &Identity,
        id: Uuid,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔄 Updating order {id}: {req:?}");

        let tracing_ctx = self.telemetry.start(
            "update_order",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = async {
            let (_, items) = self.load(id).await?;

            if !actor.is_admin() && !self.vendor_has_items(actor, &items).await? {
                return Err(ServiceError::Forbidden("Access denied".into()));
            }

            let order = self
                .command
                .update_order(id, req)
                .await
                .map_err(|e| ServiceError::not_found_or(e, ORDER_NOT_FOUND))?;

            Ok::<_, ServiceError>(OrderResponse::from_parts(order, items))
        }
        .await;

        let order = self
            .telemetry
            .finish(&tracing_ctx, Method::Put, "Order updated", result)?;

        Ok(ApiResponse::with_message("Order updated successfully", order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            CartRepositoryTrait, OrderQueryRepositoryTrait, ProductCommandRepositoryTrait,
            UserCommandRepositoryTrait, VendorCommandRepositoryTrait,
        },
        domain::requests::{
            CreateProductRecord, CreateUserRecord, CreateVendorRecord, VendorStatusUpdate,
        },
        model::CartItem,
        repository::memory::MemoryDatabase,
    };
    use assert_matches::assert_matches;
    use std::sync::Arc;

    /// Cart storage that loses its connection when asked to clear.
    struct ClearFails(Arc<MemoryDatabase>);

    #[async_trait]
    impl CartRepositoryTrait for ClearFails {
        async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepositoryError> {
            CartRepositoryTrait::find_by_user(self.0.as_ref(), user_id).await
        }

        async fn find_item(
            &self,
            user_id: Uuid,
            product_id: Uuid,
        ) -> Result<Option<CartItem>, RepositoryError> {
            CartRepositoryTrait::find_item(self.0.as_ref(), user_id, product_id).await
        }

        async fn upsert_item(&self, item: &CartItem) -> Result<CartItem, RepositoryError> {
            CartRepositoryTrait::upsert_item(self.0.as_ref(), item).await
        }

        async fn remove_item(
            &self,
            user_id: Uuid,
            product_id: Uuid,
        ) -> Result<bool, RepositoryError> {
            CartRepositoryTrait::remove_item(self.0.as_ref(), user_id, product_id).await
        }

        async fn clear(&self, _user_id: Uuid) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Custom("connection reset".into()))
        }
    }

    fn product(price: i64, discount: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            vendor_id: Uuid::new_v4(),
            name: "Basmati Rice".into(),
            description: None,
            price,
            discount,
            category: "Grains".into(),
            images: Vec::new(),
            stock: 10,
            sku: None,
            status: ProductStatus::Approved,
            rejection_reason: None,
            approved_at: None,
            rating: 0.0,
            review_count: 0,
            sales: 0,
            tags: Vec::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn merge_items_sums_repeated_products() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let items = vec![
            OrderItemRequest { product_id: a, quantity: 2 },
            OrderItemRequest { product_id: b, quantity: 1 },
            OrderItemRequest { product_id: a, quantity: 3 },
        ];

        assert_eq!(merge_items(&items).unwrap(), vec![(a, 5), (b, 1)]);
    }

    #[test]
    fn merge_items_rejects_quantity_overflow() {
        let a = Uuid::new_v4();
        let items = vec![
            OrderItemRequest { product_id: a, quantity: 2_000_000_000 },
            OrderItemRequest { product_id: a, quantity: 2_000_000_000 },
        ];

        assert_matches!(
            merge_items(&items),
            Err(ServiceError::BadRequest(msg)) if msg == QUANTITY_TOO_LARGE
        );
    }

    #[test]
    fn add_line_rejects_amount_overflow() {
        let mut record = CreateOrderRecord {
            user_id: Uuid::new_v4(),
            total_amount: 0,
            discount_amount: 0,
            tax_amount: TAX_AMOUNT,
            final_amount: 0,
            shipping_address: ShippingAddress {
                street: "1 Main Road".into(),
                city: "Pune".into(),
                state: "MH".into(),
                zip_code: "411001".into(),
                country: "India".into(),
            },
            payment_method: PaymentMethod::Upi,
            items: Vec::new(),
        };
        let mut product = product(i64::MAX / 2, 0);

        assert_matches!(
            add_line(&mut record, &product, 3),
            Err(ServiceError::BadRequest(msg)) if msg == AMOUNT_TOO_LARGE
        );
        assert!(record.items.is_empty());

        product.price = 10_000;
        product.discount = 10;
        add_line(&mut record, &product, 2).unwrap();
        assert_eq!(record.total_amount, 20_000);
        assert_eq!(record.discount_amount, 2_000);
        assert_eq!(record.items[0].total, 18_000);
    }

    #[tokio::test]
    async fn checkout_returns_order_when_cart_clear_fails() {
        let db = Arc::new(MemoryDatabase::new());

        let owner = db
            .create_user(&CreateUserRecord {
                name: "Ravi".into(),
                email: "ravi@example.com".into(),
                password_hash: "hash".into(),
                role: Role::Vendor,
            })
            .await
            .unwrap();
        let buyer = db
            .create_user(&CreateUserRecord {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                password_hash: "hash".into(),
                role: Role::User,
            })
            .await
            .unwrap();

        let shop = db
            .create_vendor(&CreateVendorRecord {
                user_id: owner.id,
                store_name: "Ravi Fresh".into(),
                store_description: None,
                contact_email: "ravi@example.com".into(),
                phone: None,
                city: None,
                state: None,
                categories: vec![],
            })
            .await
            .unwrap();
        VendorCommandRepositoryTrait::update_status(
            db.as_ref(),
            shop.id,
            &VendorStatusUpdate {
                status: VendorStatus::Approved,
                rejection_reason: None,
                approved_at: Some(chrono::Utc::now()),
                is_verified: true,
            },
        )
        .await
        .unwrap();

        let mango = db
            .create_product(&CreateProductRecord {
                vendor_id: shop.id,
                name: "Mango".into(),
                description: None,
                price: 10_000,
                discount: 0,
                category: "Fruits".into(),
                images: vec![],
                stock: 5,
                sku: None,
                tags: vec![],
            })
            .await
            .unwrap();
        ProductCommandRepositoryTrait::update_status(
            db.as_ref(),
            mango.id,
            ProductStatus::Approved,
            None,
            Some(chrono::Utc::now()),
        )
        .await
        .unwrap();

        CartRepositoryTrait::upsert_item(db.as_ref(), &CartItem {
            user_id: buyer.id,
            product_id: mango.id,
            vendor_id: shop.id,
            quantity: 2,
            price: 10_000,
            added_at: chrono::Utc::now(),
        })
        .await
        .unwrap();

        let service = OrderService::new(
            OrderServiceDeps {
                query: db.clone(),
                command: db.clone(),
                product_query: db.clone(),
                vendor_query: db.clone(),
                cart: Arc::new(ClearFails(db.clone())),
                notifications: db.clone(),
            },
            &mut Registry::default(),
        );

        let actor = Identity {
            user_id: buyer.id,
            name: buyer.name.clone(),
            email: buyer.email.clone(),
            role: Role::User,
        };
        let req = CheckoutRequest {
            shipping_address: ShippingAddress {
                street: "1 Main Road".into(),
                city: "Pune".into(),
                state: "MH".into(),
                zip_code: "411001".into(),
                country: "India".into(),
            },
            payment_method: PaymentMethod::Upi,
        };

        let placed = service.checkout(&actor, &req).await.unwrap();
        assert_eq!(placed.data.final_amount, 20_000);

        let stored = OrderQueryRepositoryTrait::find_by_id(db.as_ref(), placed.data.id)
            .await
            .unwrap();
        assert!(stored.is_some());
    }
}
