use crate::{
    abstract_trait::{
        DynAnalyticsService, DynAuthService, DynCartRepository, DynCartService,
        DynCategoryRepository, DynCategoryService, DynHashing, DynJwtService,
        DynNotificationRepository, DynNotificationService, DynOrderCommandRepository,
        DynOrderQueryRepository, DynOrderService, DynProductCommandRepository,
        DynProductQueryRepository, DynProductService, DynRefundRepository, DynRefundService,
        DynReviewRepository, DynReviewService, DynUserCommandRepository, DynUserQueryRepository,
        DynUserService, DynVendorCommandRepository, DynVendorQueryRepository, DynVendorService,
        DynWishlistRepository, DynWishlistService,
    },
    config::{AdminBootstrap, ConnectionPool},
    repository::{
        memory::MemoryDatabase,
        postgres::{
            CartRepository, CategoryRepository, NotificationRepository, OrderCommandRepository,
            OrderQueryRepository, ProductCommandRepository, ProductQueryRepository,
            RefundRepository, ReviewRepository, UserCommandRepository, UserQueryRepository,
            VendorCommandRepository, VendorQueryRepository, WishlistRepository,
        },
    },
    service::{
        AnalyticsService, AnalyticsServiceDeps, AuthService, AuthServiceDeps, CartService,
        CategoryService, NotificationService, OrderService, OrderServiceDeps, ProductService,
        ProductServiceDeps, RefundService, RefundServiceDeps, ReviewService, UserService,
        VendorService, VendorServiceDeps, WishlistService, ensure_admin,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub vendor_query: DynVendorQueryRepository,
    pub vendor_command: DynVendorCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub cart: DynCartRepository,
    pub review: DynReviewRepository,
    pub category: DynCategoryRepository,
    pub notification: DynNotificationRepository,
    pub wishlist: DynWishlistRepository,
    pub refund: DynRefundRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            user_query: Arc::new(UserQueryRepository::new(pool.clone())),
            user_command: Arc::new(UserCommandRepository::new(pool.clone())),
            vendor_query: Arc::new(VendorQueryRepository::new(pool.clone())),
            vendor_command: Arc::new(VendorCommandRepository::new(pool.clone())),
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool.clone())),
            cart: Arc::new(CartRepository::new(pool.clone())),
            review: Arc::new(ReviewRepository::new(pool.clone())),
            category: Arc::new(CategoryRepository::new(pool.clone())),
            notification: Arc::new(NotificationRepository::new(pool.clone())),
            wishlist: Arc::new(WishlistRepository::new(pool.clone())),
            refund: Arc::new(RefundRepository::new(pool)),
        }
    }

    pub fn memory() -> Self {
        let db = Arc::new(MemoryDatabase::new());

        Self {
            user_query: db.clone(),
            user_command: db.clone(),
            vendor_query: db.clone(),
            vendor_command: db.clone(),
            product_query: db.clone(),
            product_command: db.clone(),
            order_query: db.clone(),
            order_command: db.clone(),
            cart: db.clone(),
            review: db.clone(),
            category: db.clone(),
            notification: db.clone(),
            wishlist: db.clone(),
            refund: db,
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub user_service: DynUserService,
    pub vendor_service: DynVendorService,
    pub product_service: DynProductService,
    pub order_service: DynOrderService,
    pub cart_service: DynCartService,
    pub review_service: DynReviewService,
    pub category_service: DynCategoryService,
    pub notification_service: DynNotificationService,
    pub analytics_service: DynAnalyticsService,
    pub wishlist_service: DynWishlistService,
    pub refund_service: DynRefundService,
    repos: Repositories,
    hash: DynHashing,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("user_service", &"<UserService>")
            .field("vendor_service", &"<VendorService>")
            .field("product_service", &"<ProductService>")
            .field("order_service", &"<OrderService>")
            .field("cart_service", &"<CartService>")
            .field("review_service", &"<ReviewService>")
            .field("category_service", &"<CategoryService>")
            .field("notification_service", &"<NotificationService>")
            .field("analytics_service", &"<AnalyticsService>")
            .field("wishlist_service", &"<WishlistService>")
            .field("refund_service", &"<RefundService>")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub repos: Repositories,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps { repos, hash, jwt } = deps;

        let auth_service = Arc::new(AuthService::new(
            AuthServiceDeps {
                hash: hash.clone(),
                jwt,
                user_query: repos.user_query.clone(),
                user_command: repos.user_command.clone(),
            },
            registry,
        )) as DynAuthService;

        let user_service = Arc::new(UserService::new(
            repos.user_query.clone(),
            repos.user_command.clone(),
            registry,
        )) as DynUserService;

        let vendor_service = Arc::new(VendorService::new(
            VendorServiceDeps {
                query: repos.vendor_query.clone(),
                command: repos.vendor_command.clone(),
                user_query: repos.user_query.clone(),
                user_command: repos.user_command.clone(),
                notifications: repos.notification.clone(),
            },
            registry,
        )) as DynVendorService;

        let product_service = Arc::new(ProductService::new(
            ProductServiceDeps {
                query: repos.product_query.clone(),
                command: repos.product_command.clone(),
                vendor_query: repos.vendor_query.clone(),
                notifications: repos.notification.clone(),
            },
            registry,
        )) as DynProductService;

        let order_service = Arc::new(OrderService::new(
            OrderServiceDeps {
                query: repos.order_query.clone(),
                command: repos.order_command.clone(),
                product_query: repos.product_query.clone(),
                vendor_query: repos.vendor_query.clone(),
                cart: repos.cart.clone(),
                notifications: repos.notification.clone(),
            },
            registry,
        )) as DynOrderService;

        let cart_service = Arc::new(CartService::new(
            repos.cart.clone(),
            repos.product_query.clone(),
            repos.vendor_query.clone(),
            registry,
        )) as DynCartService;

        let review_service = Arc::new(ReviewService::new(
            repos.review.clone(),
            repos.product_query.clone(),
            repos.product_command.clone(),
            registry,
        )) as DynReviewService;

        let category_service = Arc::new(CategoryService::new(
            repos.category.clone(),
            repos.vendor_query.clone(),
            repos.notification.clone(),
            registry,
        )) as DynCategoryService;

        let notification_service = Arc::new(NotificationService::new(
            repos.notification.clone(),
            repos.vendor_query.clone(),
            registry,
        )) as DynNotificationService;

        let analytics_service = Arc::new(AnalyticsService::new(
            AnalyticsServiceDeps {
                user_query: repos.user_query.clone(),
                vendor_query: repos.vendor_query.clone(),
                product_query: repos.product_query.clone(),
                order_query: repos.order_query.clone(),
            },
            registry,
        )) as DynAnalyticsService;

        let wishlist_service = Arc::new(WishlistService::new(
            repos.wishlist.clone(),
            repos.product_query.clone(),
            registry,
        )) as DynWishlistService;

        let refund_service = Arc::new(RefundService::new(
            RefundServiceDeps {
                refunds: repos.refund.clone(),
                order_query: repos.order_query.clone(),
                order_command: repos.order_command.clone(),
                vendor_query: repos.vendor_query.clone(),
                notifications: repos.notification.clone(),
            },
            registry,
        )) as DynRefundService;

        Self {
            auth_service,
            user_service,
            vendor_service,
            product_service,
            order_service,
            cart_service,
            review_service,
            category_service,
            notification_service,
            analytics_service,
            wishlist_service,
            refund_service,
            repos,
            hash,
        }
    }

    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> anyhow::Result<()> {
        ensure_admin(
            admin,
            &self.repos.user_query,
            &self.repos.user_command,
            &self.hash,
        )
        .await
    }
}
