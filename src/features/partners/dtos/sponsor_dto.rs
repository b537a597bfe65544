use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::partner_dto::default_true;
use crate::features::partners::models::SponsorRow;
use crate::shared::media::MediaUrls;
use crate::shared::validation::validate_optional_url;

/// Request DTO for creating a sponsor
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSponsorDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "Logo path must not exceed 255 characters"))]
    pub logo: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    /// Sponsor level id
    pub level: Option<i64>,
    pub description: Option<String>,
    pub sponsored_since: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSponsorDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Logo path must not exceed 255 characters"))]
    pub logo: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    pub level: Option<i64>,
    pub description: Option<String>,
    pub sponsored_since: Option<NaiveDate>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SponsorResponseDto {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub level: Option<i64>,
    pub level_name: Option<String>,
    pub level_badge_color: Option<String>,
    pub description: Option<String>,
    pub sponsored_since: Option<NaiveDate>,
    pub is_active: bool,
    pub display_order: i32,
}

impl SponsorResponseDto {
    pub fn from_row(row: SponsorRow, media: &MediaUrls) -> Self {
        Self {
            id: row.id,
            logo_url: media.resolve(row.logo.as_deref()),
            name: row.name,
            logo: row.logo,
            website: row.website,
            level: row.level_id,
            level_name: row.level_name,
            level_badge_color: row.level_badge_color,
            description: row.description,
            sponsored_since: row.sponsored_since,
            is_active: row.is_active,
            display_order: row.display_order,
        }
    }
}
