mod analytics;
mod auth;
mod cart;
mod category;
mod hashing;
mod jwt;
mod notification;
mod order;
mod product;
mod refund;
mod review;
mod user;
mod vendor;
mod wishlist;

pub use self::analytics::{AnalyticsServiceTrait, DynAnalyticsService};
pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::cart::{CartRepositoryTrait, CartServiceTrait, DynCartRepository, DynCartService};
pub use self::category::{
    CategoryRepositoryTrait, CategoryServiceTrait, DynCategoryRepository, DynCategoryService,
};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait, TokenType};
pub use self::notification::{
    DynNotificationRepository, DynNotificationService, Inbox, NotificationRepositoryTrait,
    NotificationServiceTrait,
};
pub use self::order::{
    DynOrderCommandRepository, DynOrderQueryRepository, DynOrderService,
    OrderCommandRepositoryTrait, OrderQueryRepositoryTrait, OrderServiceTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductQueryRepository, DynProductService,
    ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, ProductServiceTrait,
};
pub use self::refund::{
    DynRefundRepository, DynRefundService, RefundRepositoryTrait, RefundServiceTrait,
};
pub use self::review::{
    DynReviewRepository, DynReviewService, ReviewRepositoryTrait, ReviewServiceTrait,
};
pub use self::user::{
    DynUserCommandRepository, DynUserQueryRepository, DynUserService, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait, UserServiceTrait,
};
pub use self::vendor::{
    DynVendorCommandRepository, DynVendorQueryRepository, DynVendorService,
    VendorCommandRepositoryTrait, VendorQueryRepositoryTrait, VendorServiceTrait,
};
pub use self::wishlist::{
    DynWishlistRepository, DynWishlistService, WishlistRepositoryTrait, WishlistServiceTrait,
};
