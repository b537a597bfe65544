use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::social_dto::SocialResponseDto;
use crate::features::teams::models::TeamMember;
use crate::shared::media::MediaUrls;

fn default_true() -> bool {
    true
}

/// Request DTO for adding a team member. Socials are managed separately.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeamMemberDto {
    #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
    pub full_name: String,
    #[validate(length(max = 100, message = "Position must not exceed 100 characters"))]
    pub position: String,
    pub bio: Option<String>,
    /// Media path of the profile image
    #[validate(length(max = 255, message = "Image path must not exceed 255 characters"))]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamMemberDto {
    #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 100, message = "Position must not exceed 100 characters"))]
    pub position: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 255, message = "Image path must not exceed 255 characters"))]
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// Team member with their social links
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamMemberResponseDto {
    pub id: i64,
    pub full_name: String,
    pub position: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub join_date: NaiveDate,
    pub socials: Vec<SocialResponseDto>,
}

impl TeamMemberResponseDto {
    pub fn new(member: TeamMember, socials: Vec<SocialResponseDto>, media: &MediaUrls) -> Self {
        Self {
            id: member.id,
            image_url: media.resolve(member.image.as_deref()),
            full_name: member.full_name,
            position: member.position,
            bio: member.bio,
            image: member.image,
            is_active: member.is_active,
            join_date: member.join_date,
            socials,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamStatsDto {
    pub total_members: i64,
    pub active_members: i64,
    pub inactive_members: i64,
    pub total_socials: i64,
    /// Social link count per platform, every platform present
    pub platform_statistics: BTreeMap<String, i64>,
}
