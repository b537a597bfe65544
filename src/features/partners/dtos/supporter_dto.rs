use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::partner_dto::default_true;
use crate::features::partners::models::Supporter;
use crate::shared::media::MediaUrls;
use crate::shared::validation::validate_optional_url;

/// Request DTO for creating a supporter
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSupporterDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "Logo path must not exceed 255 characters"))]
    pub logo: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    /// e.g. "Venue Provider", "Equipment Donor"
    #[validate(length(max = 100, message = "Contribution type must not exceed 100 characters"))]
    pub contribution_type: Option<String>,
    pub description: Option<String>,
    pub support_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSupporterDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Logo path must not exceed 255 characters"))]
    pub logo: Option<String>,
    #[validate(custom(function = "validate_optional_url"))]
    pub website: Option<String>,
    #[validate(length(max = 100, message = "Contribution type must not exceed 100 characters"))]
    pub contribution_type: Option<String>,
    pub description: Option<String>,
    pub support_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupporterResponseDto {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub contribution_type: Option<String>,
    pub description: Option<String>,
    pub support_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl SupporterResponseDto {
    pub fn from_row(row: Supporter, media: &MediaUrls) -> Self {
        Self {
            id: row.id,
            logo_url: media.resolve(row.logo.as_deref()),
            name: row.name,
            logo: row.logo,
            website: row.website,
            contribution_type: row.contribution_type,
            description: row.description,
            support_date: row.support_date,
            is_active: row.is_active,
        }
    }
}
