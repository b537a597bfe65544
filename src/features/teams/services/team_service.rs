use std::collections::{BTreeMap, HashMap};

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::teams::dtos::{
    CreateTeamMemberDto, SocialResponseDto, TeamMemberResponseDto, TeamStatsDto,
    UpdateTeamMemberDto,
};
use crate::features::teams::models::{Social, SocialPlatform, TeamMember};
use crate::shared::media::MediaUrls;
use crate::shared::types::{DirectoryQueryParams, PaginationQuery};
use crate::shared::validation::{optional_text, required_text, FieldErrors};

/// Service for team members. Every member is returned with its socials.
pub struct TeamService {
    pool: PgPool,
    media: MediaUrls,
}

impl TeamService {
    pub fn new(pool: PgPool, media: MediaUrls) -> Self {
        Self { pool, media }
    }

    /// Members in creation order; inactive ones only on request
    pub async fn list(
        &self,
        params: &DirectoryQueryParams,
    ) -> Result<(Vec<TeamMemberResponseDto>, i64)> {
        let pagination = params.pagination();

        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT * FROM team_members
            WHERE ($1 OR is_active)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(params.include_inactive)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list team members: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM team_members WHERE ($1 OR is_active)",
        )
        .bind(params.include_inactive)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count team members: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((self.with_socials(members).await?, total))
    }

    /// Active members having a link on `platform`
    pub async fn list_by_platform(
        &self,
        platform: SocialPlatform,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<TeamMemberResponseDto>, i64)> {
        const FILTER: &str = r#"
            WHERE t.is_active
              AND EXISTS (
                  SELECT 1 FROM team_socials s WHERE s.team_id = t.id AND s.platform = $1
              )
        "#;

        let members = sqlx::query_as::<_, TeamMember>(&format!(
            "SELECT t.* FROM team_members t {} ORDER BY t.id LIMIT $2 OFFSET $3",
            FILTER
        ))
        .bind(platform)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list team members by platform: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM team_members t {}",
            FILTER
        ))
        .bind(platform)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count team members by platform: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((self.with_socials(members).await?, total))
    }

    pub async fn get(&self, id: i64) -> Result<TeamMemberResponseDto> {
        let member = self.find(id).await?.ok_or_else(|| not_found(id))?;
        let socials = self.socials_of(id).await?;
        Ok(TeamMemberResponseDto::new(member, socials, &self.media))
    }

    /// Socials of one member
    pub async fn socials(&self, id: i64) -> Result<Vec<SocialResponseDto>> {
        if self.find(id).await?.is_none() {
            return Err(not_found(id));
        }
        self.socials_of(id).await
    }

    pub async fn create(&self, dto: CreateTeamMemberDto) -> Result<TeamMemberResponseDto> {
        let mut errors = FieldErrors::new();
        let full_name = errors.capture("full_name", required_text(&dto.full_name, "Full name"));
        let position = errors.capture("position", required_text(&dto.position, "Position"));
        errors.into_result()?;

        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (full_name, position, bio, image, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(position)
        .bind(optional_text(dto.bio))
        .bind(optional_text(dto.image))
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert team member: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Team member created: id={}, name={}", member.id, member.full_name);
        Ok(TeamMemberResponseDto::new(member, Vec::new(), &self.media))
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateTeamMemberDto,
    ) -> Result<TeamMemberResponseDto> {
        let mut errors = FieldErrors::new();
        let full_name = dto
            .full_name
            .as_deref()
            .and_then(|v| errors.capture("full_name", required_text(v, "Full name")));
        let position = dto
            .position
            .as_deref()
            .and_then(|v| errors.capture("position", required_text(v, "Position")));
        errors.into_result()?;

        let updated = sqlx::query_as::<_, TeamMember>(
            r#"
            UPDATE team_members SET
                full_name = COALESCE($2, full_name),
                position = COALESCE($3, position),
                bio = COALESCE($4, bio),
                image = COALESCE($5, image),
                is_active = COALESCE($6, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(position)
        .bind(dto.bio.map(|v| v.trim().to_string()))
        .bind(dto.image.map(|v| v.trim().to_string()))
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update team member: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| not_found(id))?;

        tracing::info!("Team member updated: id={}", id);
        let socials = self.socials_of(id).await?;
        Ok(TeamMemberResponseDto::new(updated, socials, &self.media))
    }

    /// Delete a member together with their socials
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete team member: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Team member deleted: id={}", id);
        Ok(())
    }

    pub async fn stats(&self) -> Result<TeamStatsDto> {
        let (total_members, active_members) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM team_members",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count team members: {:?}", e);
            AppError::Database(e)
        })?;

        let counts = sqlx::query_as::<_, (SocialPlatform, i64)>(
            "SELECT platform, COUNT(*) FROM team_socials GROUP BY platform",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count socials: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(build_stats(total_members, active_members, counts))
    }

    pub(crate) async fn find(&self, id: i64) -> Result<Option<TeamMember>> {
        sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get team member: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn socials_of(&self, id: i64) -> Result<Vec<SocialResponseDto>> {
        let socials = sqlx::query_as::<_, Social>(
            "SELECT * FROM team_socials WHERE team_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list socials: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(socials.into_iter().map(Into::into).collect())
    }

    /// Attach socials to a page of members with one query
    async fn with_socials(&self, members: Vec<TeamMember>) -> Result<Vec<TeamMemberResponseDto>> {
        let ids: Vec<i64> = members.iter().map(|m| m.id).collect();

        let socials = sqlx::query_as::<_, Social>(
            "SELECT * FROM team_socials WHERE team_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list socials: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(attach_socials(members, socials, &self.media))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Team member with id {} not found", id))
}

fn attach_socials(
    members: Vec<TeamMember>,
    socials: Vec<Social>,
    media: &MediaUrls,
) -> Vec<TeamMemberResponseDto> {
    let mut by_member: HashMap<i64, Vec<SocialResponseDto>> = HashMap::new();
    for social in socials {
        by_member.entry(social.team_id).or_default().push(social.into());
    }

    members
        .into_iter()
        .map(|member| {
            let socials = by_member.remove(&member.id).unwrap_or_default();
            TeamMemberResponseDto::new(member, socials, media)
        })
        .collect()
}

fn build_stats(
    total_members: i64,
    active_members: i64,
    counts: Vec<(SocialPlatform, i64)>,
) -> TeamStatsDto {
    let mut platform_statistics: BTreeMap<String, i64> = SocialPlatform::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), 0))
        .collect();
    for (platform, count) in &counts {
        platform_statistics.insert(platform.as_str().to_string(), *count);
    }

    TeamStatsDto {
        total_members,
        active_members,
        inactive_members: total_members - active_members,
        total_socials: counts.iter().map(|(_, c)| c).sum(),
        platform_statistics,
    }
}
