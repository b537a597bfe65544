mod social_repository;
mod social_service;
mod team_service;

pub use social_repository::{PgSocialRepository, SocialRecord, SocialRepository};
#[cfg(test)]
pub use social_repository::{
    duplicate_platform_message, missing_team_message, PRIMARY_TAKEN_MESSAGE,
};
pub use social_service::SocialService;
pub use team_service::TeamService;
