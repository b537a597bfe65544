use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::partner_dto::default_true;
use crate::features::partners::models::ContributorRow;
use crate::shared::media::MediaUrls;
use crate::shared::validation::{validate_optional_email, validate_optional_url};

/// Request DTO for creating a contributor
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContributorDto {
    #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
    pub full_name: String,
    /// Contributor role id
    pub role: Option<i64>,
    #[validate(length(max = 255, message = "Photo path must not exceed 255 characters"))]
    pub photo: Option<String>,
    pub bio: Option<String>,
    /// Brief highlight, e.g. "Organized 5 workshops"
    #[validate(length(max = 255, message = "Achievements must not exceed 255 characters"))]
    pub achievements: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub linkedin: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub github: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub twitter: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContributorDto {
    #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
    pub full_name: Option<String>,
    pub role: Option<i64>,
    #[validate(length(max = 255, message = "Photo path must not exceed 255 characters"))]
    pub photo: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 255, message = "Achievements must not exceed 255 characters"))]
    pub achievements: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub linkedin: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub github: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub twitter: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0, message = "Display order must not be negative"))]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContributorResponseDto {
    pub id: i64,
    pub full_name: String,
    pub role: Option<i64>,
    pub role_name: Option<String>,
    pub role_badge_color: Option<String>,
    pub photo: Option<String>,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub achievements: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

impl ContributorResponseDto {
    pub fn from_row(row: ContributorRow, media: &MediaUrls) -> Self {
        Self {
            id: row.id,
            photo_url: media.resolve(row.photo.as_deref()),
            full_name: row.full_name,
            role: row.role_id,
            role_name: row.role_name,
            role_badge_color: row.role_badge_color,
            photo: row.photo,
            bio: row.bio,
            achievements: row.achievements,
            linkedin: row.linkedin,
            github: row.github,
            twitter: row.twitter,
            website: row.website,
            email: row.email,
            is_active: row.is_active,
            display_order: row.display_order,
        }
    }
}
