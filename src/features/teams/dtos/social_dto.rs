use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::teams::models::{Social, SocialPlatform};
use crate::shared::validation::validate_optional_url;

/// Request DTO for adding a social link to a team member
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSocialDto {
    /// Team member id
    pub team: i64,
    pub platform: SocialPlatform,
    #[validate(
        custom(function = "validate_optional_url"),
        length(max = 200, message = "URL must not exceed 200 characters")
    )]
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSocialDto {
    pub team: Option<i64>,
    pub platform: Option<SocialPlatform>,
    #[validate(
        custom(function = "validate_optional_url"),
        length(max = 200, message = "URL must not exceed 200 characters")
    )]
    pub url: Option<String>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SocialResponseDto {
    pub id: i64,
    pub team: i64,
    pub platform: SocialPlatform,
    pub url: String,
    pub is_primary: bool,
}

impl From<Social> for SocialResponseDto {
    fn from(s: Social) -> Self {
        Self {
            id: s.id,
            team: s.team_id,
            platform: s.platform,
            url: s.url,
            is_primary: s.is_primary,
        }
    }
}
