mod analytics;
mod auth;
mod bootstrap;
mod cart;
mod category;
mod notification;
mod notify;
mod order;
mod product;
mod refund;
mod review;
mod user;
mod vendor;
mod wishlist;

pub use self::analytics::{AnalyticsService, AnalyticsServiceDeps};
pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::bootstrap::ensure_admin;
pub use self::cart::CartService;
pub use self::category::CategoryService;
pub use self::notification::NotificationService;
pub use self::order::{OrderService, OrderServiceDeps};
pub use self::product::{ProductService, ProductServiceDeps};
pub use self::refund::{RefundService, RefundServiceDeps};
pub use self::review::ReviewService;
pub use self::user::UserService;
pub use self::vendor::{VendorService, VendorServiceDeps};
pub use self::wishlist::WishlistService;
