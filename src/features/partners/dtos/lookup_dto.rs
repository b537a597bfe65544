use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::partners::models::LookupEntry;

/// Request DTO for creating a lookup row (tier, type, role or level)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLookupDto {
    #[validate(length(max = 50, message = "Name must not exceed 50 characters"))]
    pub name: String,
    pub description: Option<String>,
    /// CSS color used for badges, e.g. `#FFD700`
    #[validate(length(max = 20, message = "Badge color must not exceed 20 characters"))]
    pub badge_color: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLookupDto {
    #[validate(length(max = 50, message = "Name must not exceed 50 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 20, message = "Badge color must not exceed 20 characters"))]
    pub badge_color: Option<String>,
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LookupResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub badge_color: Option<String>,
    pub display_order: i32,
}

impl From<LookupEntry> for LookupResponseDto {
    fn from(e: LookupEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            badge_color: e.badge_color,
            display_order: e.display_order,
        }
    }
}
