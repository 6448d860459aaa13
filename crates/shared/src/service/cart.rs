use crate::{
    abstract_trait::{
        CartServiceTrait, DynCartRepository, DynProductQueryRepository, DynVendorQueryRepository,
    },
    domain::{
        Identity,
        requests::{AddCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartItemResponse, CartResponse},
    },
    errors::ServiceError,
    model::{CartItem, Product},
    service::order::ensure_purchasable,
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

const ITEM_NOT_IN_CART: &str = "Item not found in cart";
const INSUFFICIENT_STOCK: &str = "Insufficient stock";

pub struct CartService {
    cart: DynCartRepository,
    product_query: DynProductQueryRepository,
    vendor_query: DynVendorQueryRepository,
    telemetry: ServiceTelemetry,
}

impl CartService {
    pub fn new(
        cart: DynCartRepository,
        product_query: DynProductQueryRepository,
        vendor_query: DynVendorQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            cart,
            product_query,
            vendor_query,
            telemetry: ServiceTelemetry::new("cart-service", registry),
        }
    }

    async fn purchasable_product(&self, product_id: Uuid) -> Result<Product, ServiceError> {
        let product = self
            .product_query
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

        let vendor = self.vendor_query.find_by_id(product.vendor_id).await?;
        ensure_purchasable(&product, vendor.as_ref())?;

        Ok(product)
    }

    async fn snapshot(&self, user_id: Uuid) -> Result<CartResponse, ServiceError> {
        let lines = self.cart.find_by_user(user_id).await?;
        if lines.is_empty() {
            return Ok(CartResponse::default());
        }

        let ids: Vec<Uuid> = lines.iter().map(|l| l.product_id).collect();
        let products: HashMap<Uuid, Product> = self
            .product_query
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let items = lines
            .into_iter()
            .map(|line| {
                let product = products.get(&line.product_id);
                CartItemResponse {
                    product_id: line.product_id,
                    vendor_id: line.vendor_id,
                    name: product.map(|p| p.name.clone()),
                    image: product.and_then(|p| p.images.first().cloned()),
                    quantity: line.quantity,
                    price: line.price,
                    line_total: line.price.saturating_mul(i64::from(line.quantity)),
                }
            })
            .collect();

        Ok(CartResponse::new(items))
    }

    async fn save_line(
        &self,
        user_id: Uuid,
        product: &Product,
        quantity: i32,
        existing: Option<CartItem>,
    ) -> Result<(), ServiceError> {
        if quantity > product.stock {
            return Err(ServiceError::BadRequest(INSUFFICIENT_STOCK.into()));
        }

        let line = CartItem {
            user_id,
            product_id: product.id,
            vendor_id: product.vendor_id,
            quantity,
            price: product.unit_price(),
            added_at: existing.map(|e| e.added_at).unwrap_or_else(Utc::now),
        };

        self.cart.upsert_item(&line).await?;
        Ok(())
    }

    async fn do_add(&self, actor: &Identity, req: &AddCartItemRequest) -> Result<(), ServiceError> {
        let product = self.purchasable_product(req.product_id).await?;
        let existing = self.cart.find_item(actor.user_id, product.id).await?;
        let quantity = existing
            .as_ref()
            .map(|e| e.quantity)
            .unwrap_or(0)
            .checked_add(req.quantity)
            .ok_or_else(|| ServiceError::BadRequest(INSUFFICIENT_STOCK.into()))?;

        self.save_line(actor.user_id, &product, quantity, existing)
            .await
    }

    async fn do_update(
        &self,
        actor: &Identity,
        req: &UpdateCartItemRequest,
    ) -> Result<(), ServiceError> {
        let existing = self
            .cart
            .find_item(actor.user_id, req.product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(ITEM_NOT_IN_CART.into()))?;

        if req.quantity <= 0 {
            self.cart.remove_item(actor.user_id, req.product_id).await?;
            return Ok(());
        }

        let product = self.purchasable_product(req.product_id).await?;
        self.save_line(actor.user_id, &product, req.quantity, Some(existing))
            .await
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn get(&self, actor: &Identity) -> Result<ApiResponse<CartResponse>, ServiceError> {
        Ok(ApiResponse::success(self.snapshot(actor.user_id).await?))
    }

    async fn add(
        &self,
        actor: &Identity,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        info!("🛒 {} adds {} x {}", actor.email, req.quantity, req.product_id);

        let tracing_ctx = self.telemetry.start(
            "add_to_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("product.id", req.product_id.to_string()),
                KeyValue::new("product.quantity", i64::from(req.quantity)),
            ],
        );

        self.telemetry.finish(
            &tracing_ctx,
            Method::Post,
            "Item added to cart",
            self.do_add(actor, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Item added to cart",
            self.snapshot(actor.user_id).await?,
        ))
    }

    async fn update(
        &self,
        actor: &Identity,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "update_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("product.id", req.product_id.to_string()),
                KeyValue::new("product.quantity", i64::from(req.quantity)),
            ],
        );

        self.telemetry.finish(
            &tracing_ctx,
            Method::Put,
            "Cart updated",
            self.do_update(actor, req).await,
        )?;

        Ok(ApiResponse::with_message(
            "Cart updated",
            self.snapshot(actor.user_id).await?,
        ))
    }

    async fn remove(
        &self,
        actor: &Identity,
        product_id: Option<Uuid>,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let message = match product_id {
            Some(product_id) => {
                if !self.cart.remove_item(actor.user_id, product_id).await? {
                    return Err(ServiceError::NotFound(ITEM_NOT_IN_CART.into()));
                }
                "Item removed from cart"
            }
            None => {
                let removed = self.cart.clear(actor.user_id).await?;
                info!("🧹 Cleared {removed} cart lines for {}", actor.email);
                "Cart cleared"
            }
        };

        Ok(ApiResponse::with_message(
            message,
            self.snapshot(actor.user_id).await?,
        ))
    }
}
