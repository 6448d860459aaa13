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

pub use self::cart::CartRepository;
pub use self::category::CategoryRepository;
pub use self::notification::NotificationRepository;
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::product::{ProductCommandRepository, ProductQueryRepository};
pub use self::refund::RefundRepository;
pub use self::review::ReviewRepository;
pub use self::user::{UserCommandRepository, UserQueryRepository};
pub use self::vendor::{VendorCommandRepository, VendorQueryRepository};
pub use self::wishlist::WishlistRepository;

/// `%term%` for ILIKE, or `None` for a blank search.
pub(crate) fn like_pattern(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("%{t}%"))
}
