use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::partners::models::PartnerRow;
use crate::shared::media::MediaUrls;
use crate::shared::validation::validate_optional_url;

/// Request DTO for creating a partner
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePartnerDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,
    /// Short description of what the partner does
    pub description: String,
    /// Media path of the logo
    #[validate(length(max = 255, message = "Logo path must not exceed 255 characters"))]
    pub logo: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    /// Partner tier id
    pub tier: Option<i64>,
    /// Partner type id
    pub partner_type: Option<i64>,
    /// Date the partnership started
    pub partnership_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: i32,
}

/// Request DTO for updating a partner. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePartnerDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255, message = "Logo path must not exceed 255 characters"))]
    pub logo: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    pub tier: Option<i64>,
    pub partner_type: Option<i64>,
    pub partnership_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PartnerResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub tier: Option<i64>,
    pub tier_name: Option<String>,
    pub tier_badge_color: Option<String>,
    pub partner_type: Option<i64>,
    pub partner_type_name: Option<String>,
    pub partnership_date: NaiveDate,
    pub is_active: bool,
    pub display_order: i32,
}

impl PartnerResponseDto {
    pub fn from_row(row: PartnerRow, media: &MediaUrls) -> Self {
        Self {
            id: row.id,
            logo_url: media.resolve(row.logo.as_deref()),
            name: row.name,
            description: row.description,
            logo: row.logo,
            website: row.website,
            tier: row.tier_id,
            tier_name: row.tier_name,
            tier_badge_color: row.tier_badge_color,
            partner_type: row.partner_type_id,
            partner_type_name: row.partner_type_name,
            partnership_date: row.partnership_date,
            is_active: row.is_active,
            display_order: row.display_order,
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}
