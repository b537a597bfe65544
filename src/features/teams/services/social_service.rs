//! Social links of team members.
//!
//! Links can only be attached to active members, and a member has at most
//! one primary link. `(team, platform)` is unique.

use std::sync::Arc;

use super::social_repository::{
    missing_team_message, SocialRecord, SocialRepository, PRIMARY_TAKEN_MESSAGE,
};
use crate::core::error::{AppError, Result};
use crate::features::teams::dtos::{CreateSocialDto, SocialResponseDto, UpdateSocialDto};
use crate::features::teams::models::TeamMember;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{required_text, FieldErrors};

const INACTIVE_TEAM_MESSAGE: &str = "Cannot add social media links to inactive team members.";

pub struct SocialService {
    repository: Arc<dyn SocialRepository>,
}

impl SocialService {
    pub fn new(repository: Arc<dyn SocialRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<SocialResponseDto>, i64)> {
        let (socials, total) = self
            .repository
            .list(pagination.offset(), pagination.limit())
            .await?;
        Ok((socials.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<SocialResponseDto> {
        self.repository
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateSocialDto) -> Result<SocialResponseDto> {
        let mut errors = FieldErrors::new();
        let url = errors.capture("url", required_text(&dto.url, "URL"));
        let team = self.repository.find_team(dto.team).await?;
        errors.capture("team", team_accepts_socials(dto.team, team.as_ref()));
        if dto.is_primary {
            let other = self.repository.other_primary(dto.team, None).await?;
            errors.capture("is_primary", primary_available(other));
        }
        errors.into_result()?;

        let Some(url) = url else {
            return Err(AppError::field("url", "URL cannot be empty."));
        };
        let social = self
            .repository
            .insert(&SocialRecord {
                team_id: dto.team,
                platform: dto.platform,
                url,
                is_primary: dto.is_primary,
            })
            .await?;

        tracing::info!(
            "Social created: id={}, team_id={}, platform={}",
            social.id,
            social.team_id,
            social.platform
        );
        Ok(social.into())
    }

    /// Partial update. Moving a link to another member re-checks that member;
    /// the link being updated never counts against its own primary flag.
    pub async fn update(&self, id: i64, dto: UpdateSocialDto) -> Result<SocialResponseDto> {
        let existing = self
            .repository
            .find(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let team_id = dto.team.unwrap_or(existing.team_id);
        let is_primary = dto.is_primary.unwrap_or(existing.is_primary);

        let mut errors = FieldErrors::new();
        let url = dto
            .url
            .as_deref()
            .and_then(|v| errors.capture("url", required_text(v, "URL")));
        if let Some(new_team) = dto.team {
            let team = self.repository.find_team(new_team).await?;
            errors.capture("team", team_accepts_socials(new_team, team.as_ref()));
        }
        if is_primary {
            let other = self.repository.other_primary(team_id, Some(id)).await?;
            errors.capture("is_primary", primary_available(other));
        }
        errors.into_result()?;

        let record = SocialRecord {
            team_id,
            platform: dto.platform.unwrap_or(existing.platform),
            url: url.unwrap_or(existing.url),
            is_primary,
        };
        let social = self
            .repository
            .update(id, &record)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Social updated: id={}", id);
        Ok(social.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Social deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Social with id {} not found", id))
}

/// Links may only be attached to existing, active members
fn team_accepts_socials(team_id: i64, team: Option<&TeamMember>) -> std::result::Result<(), String> {
    match team {
        None => Err(missing_team_message(team_id)),
        Some(member) if !member.is_active => Err(INACTIVE_TEAM_MESSAGE.to_string()),
        Some(_) => Ok(()),
    }
}

/// A primary link may only be set when no other link of the member is primary
fn primary_available(other_primary: Option<i64>) -> std::result::Result<(), String> {
    match other_primary {
        Some(_) => Err(PRIMARY_TAKEN_MESSAGE.to_string()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::teams::dtos::CreateTeamMemberDto;
    use crate::features::teams::models::SocialPlatform;
    use crate::features::teams::services::{PgSocialRepository, TeamService};
    use crate::shared::media::MediaUrls;
    use crate::shared::test_helpers::{team_member_fixture, InMemorySocialRepository};
    use sqlx::PgPool;

    fn service() -> SocialService {
        let repository = InMemorySocialRepository::with_members(vec![
            team_member_fixture(1, "Ada Lovelace", true),
            team_member_fixture(2, "Alan Turing", true),
            team_member_fixture(3, "Grace Hopper", false),
        ]);
        SocialService::new(Arc::new(repository))
    }

    fn social_dto(team: i64, platform: SocialPlatform, is_primary: bool) -> CreateSocialDto {
        CreateSocialDto {
            team,
            platform,
            url: format!("https://example.com/{}", platform),
            is_primary,
        }
    }

    fn field_error(result: Result<SocialResponseDto>, field: &str) -> String {
        match result {
            Err(AppError::InvalidFields(errors)) => errors
                .get(field)
                .and_then(|messages| messages.first().cloned())
                .unwrap_or_else(|| panic!("no error on {field}")),
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_team_accepts_socials() {
        assert!(team_accepts_socials(1, Some(&team_member_fixture(1, "Ada", true))).is_ok());
        assert_eq!(
            team_accepts_socials(1, Some(&team_member_fixture(1, "Ada", false))).unwrap_err(),
            INACTIVE_TEAM_MESSAGE
        );
        assert_eq!(
            team_accepts_socials(9, None).unwrap_err(),
            "Team member 9 does not exist."
        );
    }

    #[tokio::test]
    async fn test_inactive_and_missing_members_are_rejected() {
        let service = service();

        assert_eq!(
            field_error(
                service.create(social_dto(3, SocialPlatform::Github, false)).await,
                "team"
            ),
            INACTIVE_TEAM_MESSAGE
        );
        assert_eq!(
            field_error(
                service.create(social_dto(42, SocialPlatform::Github, false)).await,
                "team"
            ),
            "Team member 42 does not exist."
        );
    }

    #[tokio::test]
    async fn test_second_primary_is_rejected() {
        let service = service();
        service
            .create(social_dto(1, SocialPlatform::Github, true))
            .await
            .unwrap();

        assert_eq!(
            field_error(
                service.create(social_dto(1, SocialPlatform::Linkedin, true)).await,
                "is_primary"
            ),
            PRIMARY_TAKEN_MESSAGE
        );

        // Another member keeps their own primary slot
        let other = service
            .create(social_dto(2, SocialPlatform::Linkedin, true))
            .await
            .unwrap();
        assert!(other.is_primary);
    }

    #[tokio::test]
    async fn test_updating_the_primary_link_does_not_count_against_itself() {
        let service = service();
        let github = service
            .create(social_dto(1, SocialPlatform::Github, true))
            .await
            .unwrap();
        let linkedin = service
            .create(social_dto(1, SocialPlatform::Linkedin, false))
            .await
            .unwrap();

        let updated = service
            .update(
                github.id,
                UpdateSocialDto {
                    is_primary: Some(true),
                    url: Some(" https://github.com/ada ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_primary);
        assert_eq!(updated.url, "https://github.com/ada");

        // Promoting a sibling is still rejected
        assert_eq!(
            field_error(
                service
                    .update(
                        linkedin.id,
                        UpdateSocialDto {
                            is_primary: Some(true),
                            ..Default::default()
                        },
                    )
                    .await,
                "is_primary"
            ),
            PRIMARY_TAKEN_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_moving_a_primary_link_checks_the_new_member() {
        let service = service();
        service
            .create(social_dto(2, SocialPlatform::Twitter, true))
            .await
            .unwrap();
        let github = service
            .create(social_dto(1, SocialPlatform::Github, true))
            .await
            .unwrap();

        let moved = service
            .update(
                github.id,
                UpdateSocialDto {
                    team: Some(2),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(field_error(moved, "is_primary"), PRIMARY_TAKEN_MESSAGE);

        let moved = service
            .update(
                github.id,
                UpdateSocialDto {
                    team: Some(3),
                    is_primary: Some(false),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(field_error(moved, "team"), INACTIVE_TEAM_MESSAGE);
    }

    #[tokio::test]
    async fn test_duplicate_platform_is_bad_request() {
        let service = service();
        service
            .create(social_dto(1, SocialPlatform::Github, false))
            .await
            .unwrap();

        match service
            .create(social_dto(1, SocialPlatform::Github, false))
            .await
        {
            Err(AppError::BadRequest(msg)) => {
                assert_eq!(msg, "This team member already has a GitHub link.")
            }
            other => panic!("expected duplicate rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_and_delete_unknown_link() {
        let service = service();

        assert!(matches!(service.get(5).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(5).await, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_social_rules_against_database(pool: PgPool) {
        let teams = TeamService::new(pool.clone(), MediaUrls::new("http://media.test"));
        let socials = SocialService::new(Arc::new(PgSocialRepository::new(pool)));

        let ada = teams
            .create(CreateTeamMemberDto {
                full_name: "Ada Lovelace".to_string(),
                position: "Lead".to_string(),
                bio: None,
                image: None,
                is_active: true,
            })
            .await
            .unwrap();

        let github = socials
            .create(social_dto(ada.id, SocialPlatform::Github, true))
            .await
            .unwrap();

        assert_eq!(
            field_error(
                socials
                    .create(social_dto(ada.id, SocialPlatform::Linkedin, true))
                    .await,
                "is_primary"
            ),
            PRIMARY_TAKEN_MESSAGE
        );

        // Unique (team, platform) enforced by the database
        assert!(matches!(
            socials
                .create(social_dto(ada.id, SocialPlatform::Github, false))
                .await,
            Err(AppError::BadRequest(_))
        ));

        let updated = socials
            .update(
                github.id,
                UpdateSocialDto {
                    is_primary: Some(true),
                    url: Some("https://github.com/ada".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_primary);

        // Deleting the member cascades
        teams.delete(ada.id).await.unwrap();
        assert!(matches!(
            socials.get(github.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
