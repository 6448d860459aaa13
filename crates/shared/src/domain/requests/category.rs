use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Fresh Vegetables")]
    pub name: String,

    #[validate(length(min = 1, message = "Slug is required"))]
    #[schema(example = "fresh-vegetables")]
    pub slug: String,

    pub image_url: Option<String>,
}
