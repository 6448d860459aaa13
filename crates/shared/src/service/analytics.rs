use crate::{
    abstract_trait::{
        AnalyticsServiceTrait, DynOrderQueryRepository, DynProductQueryRepository,
        DynUserQueryRepository, DynVendorQueryRepository,
    },
    domain::{
        Identity,
        responses::{
            AdminAnalyticsResponse, AdminRecent, AdminTotals, ApiResponse, FavoriteCategory,
            PeriodSummary, TopProduct, TopVendor, UserAnalyticsResponse, UserTotals,
            VendorAnalyticsResponse, VendorTotals,
        },
    },
    errors::ServiceError,
    model::{Order, OrderItem},
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub const RECENT_WINDOW_DAYS: i64 = 30;
pub const TOP_N: usize = 5;

#[derive(Default)]
struct Tally {
    quantity: i64,
    revenue: i64,
}

/// Per-key quantity and revenue, ranked by `rank` descending and capped at [`TOP_N`].
fn rank_items<'a, K, I, F>(items: I, key: impl Fn(&OrderItem) -> K, rank: F) -> Vec<(K, Tally)>
where
    K: std::hash::Hash + Eq + Ord + Copy,
    I: IntoIterator<Item = &'a OrderItem>,
    F: Fn(&Tally) -> i64,
{
    let mut tallies: HashMap<K, Tally> = HashMap::new();
    for item in items {
        let tally = tallies.entry(key(item)).or_default();
        tally.quantity += i64::from(item.quantity);
        tally.revenue += item.total;
    }

    let mut ranked: Vec<(K, Tally)> = tallies.into_iter().collect();
    ranked.sort_by(|(ka, a), (kb, b)| rank(b).cmp(&rank(a)).then(ka.cmp(kb)));
    ranked.truncate(TOP_N);
    ranked
}

fn since(orders: &[Order], cutoff: DateTime<Utc>) -> impl Iterator<Item = &Order> {
    orders.iter().filter(move |o| o.created_at >= cutoff)
}

pub struct AnalyticsServiceDeps {
    pub user_query: DynUserQueryRepository,
    pub vendor_query: DynVendorQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub order_query: DynOrderQueryRepository,
}

pub struct AnalyticsService {
    user_query: DynUserQueryRepository,
    vendor_query: DynVendorQueryRepository,
    product_query: DynProductQueryRepository,
    order_query: DynOrderQueryRepository,
    telemetry: ServiceTelemetry,
}

impl AnalyticsService {
    pub fn new(deps: AnalyticsServiceDeps, registry: &mut Registry) -> Self {
        let AnalyticsServiceDeps {
            user_query,
            vendor_query,
            product_query,
            order_query,
        } = deps;

        Self {
            user_query,
            vendor_query,
            product_query,
            order_query,
            telemetry: ServiceTelemetry::new("analytics-service", registry),
        }
    }

    fn cutoff() -> DateTime<Utc> {
        Utc::now() - Duration::days(RECENT_WINDOW_DAYS)
    }

    async fn top_products(
        &self,
        ranked: Vec<(Uuid, Tally)>,
    ) -> Result<Vec<TopProduct>, ServiceError> {
        let ids: Vec<Uuid> = ranked.iter().map(|(id, _)| *id).collect();
        let names: HashMap<Uuid, String> = self
            .product_query
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        Ok(ranked
            .into_iter()
            .map(|(product_id, tally)| TopProduct {
                product_id,
                name: names.get(&product_id).cloned().unwrap_or_default(),
                quantity: tally.quantity,
                revenue: tally.revenue,
            })
            .collect())
    }

    async fn build_admin(&self) -> Result<AdminAnalyticsResponse, ServiceError> {
        let cutoff = Self::cutoff();
        let orders = self.order_query.find_all_orders().await?;
        let items = self.order_query.find_all_items().await?;

        let totals = AdminTotals {
            users: self.user_query.count().await?,
            vendors: self.vendor_query.count().await?,
            products: self.product_query.count().await?,
            orders: orders.len() as i64,
            sales: orders.iter().map(|o| o.final_amount).sum(),
        };

        let recent = AdminRecent {
            sales: since(&orders, cutoff).map(|o| o.final_amount).sum(),
            orders: since(&orders, cutoff).count() as i64,
            user_growth: self.user_query.count_created_since(cutoff).await?,
            vendor_growth: self.vendor_query.count_created_since(cutoff).await?,
        };

        let ranked_vendors = rank_items(&items, |i| i.vendor_id, |t| t.revenue);
        let vendor_ids: Vec<Uuid> = ranked_vendors.iter().map(|(id, _)| *id).collect();
        let store_names: HashMap<Uuid, String> = self
            .vendor_query
            .find_by_ids(&vendor_ids)
            .await?
            .into_iter()
            .map(|v| (v.id, v.store_name))
            .collect();

        let top_vendors = ranked_vendors
            .into_iter()
            .map(|(vendor_id, tally)| TopVendor {
                vendor_id,
                store_name: store_names.get(&vendor_id).cloned().unwrap_or_default(),
                sales: tally.revenue,
            })
            .collect();

        let top_products = self
            .top_products(rank_items(&items, |i| i.product_id, |t| t.quantity))
            .await?;

        Ok(AdminAnalyticsResponse {
            totals,
            recent,
            top_vendors,
            top_products,
        })
    }

    async fn build_vendor(
        &self,
        actor: &Identity,
    ) -> Result<VendorAnalyticsResponse, ServiceError> {
        let vendor = self
            .vendor_query
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Vendor not found".into()))?;

        let cutoff = Self::cutoff();
        let orders = self.order_query.find_by_vendor(vendor.id).await?;
        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let items: Vec<OrderItem> = self
            .order_query
            .find_items(&order_ids)
            .await?
            .into_iter()
            .filter(|i| i.vendor_id == vendor.id)
            .collect();

        let recent_ids: HashSet<Uuid> = since(&orders, cutoff).map(|o| o.id).collect();
        let recent_items = items.iter().filter(|i| recent_ids.contains(&i.order_id));

        let totals = VendorTotals {
            products: self.product_query.count_by_vendor(vendor.id).await?,
            orders: orders.len() as i64,
            sales: items.iter().map(|i| i.total).sum(),
        };

        let recent = PeriodSummary {
            sales: recent_items.map(|i| i.total).sum(),
            orders: recent_ids.len() as i64,
        };

        let top_products = self
            .top_products(rank_items(&items, |i| i.product_id, |t| t.revenue))
            .await?;

        Ok(VendorAnalyticsResponse {
            totals,
            recent,
            top_products,
        })
    }

    async fn build_user(&self, actor: &Identity) -> Result<UserAnalyticsResponse, ServiceError> {
        let cutoff = Self::cutoff();
        let orders: Vec<Order> = self
            .order_query
            .find_all_orders()
            .await?
            .into_iter()
            .filter(|o| o.user_id == actor.user_id)
            .collect();

        let totals = UserTotals {
            orders: orders.len() as i64,
            spent: orders.iter().map(|o| o.final_amount).sum(),
        };
        let recent = UserTotals {
            orders: since(&orders, cutoff).count() as i64,
            spent: since(&orders, cutoff).map(|o| o.final_amount).sum(),
        };

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let items = self.order_query.find_items(&order_ids).await?;

        let mut product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        product_ids.sort();
        product_ids.dedup();
        let categories: HashMap<Uuid, String> = self
            .product_query
            .find_by_ids(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p.category))
            .collect();

        let mut counts: HashMap<String, i64> = HashMap::new();
        for item in &items {
            if let Some(category) = categories.get(&item.product_id) {
                *counts.entry(category.clone()).or_default() += i64::from(item.quantity);
            }
        }

        let mut favorite_categories: Vec<FavoriteCategory> = counts
            .into_iter()
            .map(|(category, count)| FavoriteCategory { category, count })
            .collect();
        favorite_categories
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
        favorite_categories.truncate(TOP_N);

        Ok(UserAnalyticsResponse {
            totals,
            recent,
            favorite_categories,
        })
    }
}

#[async_trait]
impl AnalyticsServiceTrait for AnalyticsService {
    async fn admin(&self) -> Result<ApiResponse<AdminAnalyticsResponse>, ServiceError> {
        let tracing_ctx = self
            .telemetry
            .start("admin_analytics", vec![KeyValue::new("component", "analytics")]);

        let report = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Admin analytics computed",
            self.build_admin().await,
        )?;

        Ok(ApiResponse::success(report))
    }

    async fn vendor(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<VendorAnalyticsResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "vendor_analytics",
            vec![
                KeyValue::new("component", "analytics"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let report = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "Vendor analytics computed",
            self.build_vendor(actor).await,
        )?;

        Ok(ApiResponse::success(report))
    }

    async fn user(
        &self,
        actor: &Identity,
    ) -> Result<ApiResponse<UserAnalyticsResponse>, ServiceError> {
        let tracing_ctx = self.telemetry.start(
            "user_analytics",
            vec![
                KeyValue::new("component", "analytics"),
                KeyValue::new("user.id", actor.user_id.to_string()),
            ],
        );

        let report = self.telemetry.finish(
            &tracing_ctx,
            Method::Get,
            "User analytics computed",
            self.build_user(actor).await,
        )?;

        Ok(ApiResponse::success(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Uuid, vendor_id: Uuid, quantity: i32, total: i64) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            product_id,
            vendor_id,
            quantity,
            price: total / i64::from(quantity),
            total,
        }
    }

    #[test]
    fn rank_items_orders_by_metric_and_caps() {
        let vendor = Uuid::new_v4();
        let products: Vec<Uuid> = (0..7).map(|_| Uuid::new_v4()).collect();
        let mut items: Vec<OrderItem> = products
            .iter()
            .enumerate()
            .map(|(n, id)| item(*id, vendor, n as i32 + 1, 100))
            .collect();
        items.push(item(products[0], vendor, 10, 1_000));

        let ranked = rank_items(&items, |i| i.product_id, |t| t.quantity);

        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].0, products[0]);
        assert_eq!(ranked[0].1.quantity, 11);
        assert_eq!(ranked[0].1.revenue, 1_100);
        assert_eq!(ranked[1].0, products[6]);
    }
}
