mod analytics;
mod api;
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

pub use self::analytics::{
    AdminAnalyticsResponse, AdminRecent, AdminTotals, FavoriteCategory, PeriodSummary,
    TopProduct, TopVendor, UserAnalyticsResponse, UserTotals, VendorAnalyticsResponse,
    VendorTotals,
};
pub use self::api::{ApiResponse, ApiResponsePagination, Pagination};
pub use self::cart::{CartItemResponse, CartResponse};
pub use self::category::CategoryResponse;
pub use self::notification::{
    DeliveryResponse, NotificationHistoryResponse, NotificationResponse, UnreadCountResponse,
    truncate_preview,
};
pub use self::order::{OrderItemResponse, OrderResponse};
pub use self::product::ProductResponse;
pub use self::refund::RefundResponse;
pub use self::review::ReviewResponse;
pub use self::user::{TokenResponse, UserResponse};
pub use self::vendor::VendorResponse;
pub use self::wishlist::{WishlistItemResponse, WishlistResponse};
