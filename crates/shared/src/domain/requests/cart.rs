use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddCartItemRequest {
    pub product_id: Uuid,

    #[serde(default = "one")]
    #[validate(range(min = 1, max = 10000, message = "Quantity must be between 1 and 10000"))]
    pub quantity: i32,
}

fn one() -> i32 {
    1
}

/// A quantity of zero or less removes the item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemRequest {
    pub product_id: Uuid,
    #[validate(range(max = 10000, message = "Quantity must be at most 10000"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct RemoveCartItemQuery {
    /// Omit to clear the whole cart.
    pub product_id: Option<Uuid>,
}
