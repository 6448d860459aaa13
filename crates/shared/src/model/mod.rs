mod cart;
mod category;
mod enums;
mod notification;
mod order;
mod product;
mod refund;
mod review;
mod user;
mod vendor;
mod wishlist;

pub use self::cart::CartItem;
pub use self::category::Category;
pub use self::enums::{
    Audience, NotificationKind, OrderStatus, PaymentMethod, PaymentStatus, ProductStatus,
    RefundStatus, Role, UnknownVariant, VendorStatus,
};
pub use self::notification::Notification;
pub use self::order::{Order, OrderItem, ShippingAddress};
pub use self::product::Product;
pub use self::refund::Refund;
pub use self::review::Review;
pub use self::user::User;
pub use self::vendor::Vendor;
pub use self::wishlist::WishlistItem;
