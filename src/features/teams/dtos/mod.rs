mod social_dto;
mod team_dto;

pub use social_dto::{CreateSocialDto, SocialResponseDto, UpdateSocialDto};
pub use team_dto::{CreateTeamMemberDto, TeamMemberResponseDto, TeamStatsDto, UpdateTeamMemberDto};
