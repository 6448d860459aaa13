mod auth;
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

pub use self::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use self::cart::{AddCartItemRequest, RemoveCartItemQuery, UpdateCartItemRequest};
pub use self::category::CreateCategoryRequest;
pub use self::notification::{
    BestSellerInviteRequest, CreateNotificationRecord, SendNotificationRequest,
};
pub use self::order::{
    CheckoutRequest, CreateOrderItemRecord, CreateOrderRecord, CreateOrderRequest, FindAllOrders,
    OrderItemRequest, UpdateOrderRequest,
};
pub use self::product::{
    CreateProductRecord, CreateProductRequest, FindAllProducts, ProductListFilter, ProductSort,
    ReviewProductRequest, UpdateProductRequest,
};
pub use self::refund::{
    CreateRefundRecord, CreateRefundRequest, FindAllRefunds, RefundScope, UpdateRefundRequest,
};
pub use self::review::{
    CreateReviewRecord, CreateReviewRequest, FindAllReviews, ReviewSortField, SortOrder,
    UpdateReviewRequest,
};
pub use self::user::{AdminUpdateUserRequest, CreateUserRecord, FindAllUsers, UpdateProfileRequest};
pub use self::vendor::{
    CreateVendorRecord, CreateVendorRequest, FindAllVendors, RejectVendorRequest,
    ReviewVendorRequest, UpdateVendorProfileRequest, VendorStatusUpdate,
};
pub use self::wishlist::{AddWishlistItemRequest, RemoveWishlistItemQuery};

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Highest page whose offset still fits in an `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Bare `?page=&limit=` query for lists without filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Clamps raw query values into `(page, limit, offset)`.
pub fn page_bounds(page: i64, limit: i64) -> (i64, i64, i64) {
    let page = page.clamp(1, MAX_PAGE);
    let limit = if limit < 1 {
        DEFAULT_PAGE_SIZE
    } else {
        limit.min(MAX_PAGE_SIZE)
    };
    (page, limit, (page - 1).saturating_mul(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_clamps_values() {
        assert_eq!(page_bounds(0, 0), (1, 10, 0));
        assert_eq!(page_bounds(3, 20), (3, 20, 40));
        assert_eq!(page_bounds(2, 1_000), (2, 100, 100));
    }

    #[test]
    fn page_bounds_caps_huge_pages() {
        let (page, limit, offset) = page_bounds(i64::MAX, 100);
        assert_eq!(page, MAX_PAGE);
        assert_eq!(limit, 100);
        assert!(offset > 0);

        let (_, _, offset) = page_bounds(i64::MAX, 1);
        assert_eq!(offset, MAX_PAGE - 1);
    }
}
