//! Storage seam for social links.
//!
//! `SocialService` keeps the membership and primary-link rules and reaches
//! the database only through this trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{is_foreign_key_violation, unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::teams::models::{Social, SocialPlatform, TeamMember};

pub const PRIMARY_TAKEN_MESSAGE: &str = "This team member already has a primary social media link.";

const PLATFORM_CONSTRAINT: &str = "uq_team_socials_team_platform";
const PRIMARY_CONSTRAINT: &str = "uq_team_socials_primary";

/// Message for a second link on the same platform
pub fn duplicate_platform_message(platform: SocialPlatform) -> String {
    format!("This team member already has a {} link.", platform.label())
}

pub fn missing_team_message(team_id: i64) -> String {
    format!("Team member {} does not exist.", team_id)
}

/// Column values of one social link
#[derive(Debug, Clone)]
pub struct SocialRecord {
    pub team_id: i64,
    pub platform: SocialPlatform,
    pub url: String,
    pub is_primary: bool,
}

#[async_trait]
pub trait SocialRepository: Send + Sync {
    async fn find_team(&self, team_id: i64) -> Result<Option<TeamMember>>;

    /// Page of links ordered by member, plus the total count
    async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Social>, i64)>;

    async fn find(&self, id: i64) -> Result<Option<Social>>;

    /// Id of the member's primary link, ignoring `exclude`
    async fn other_primary(&self, team_id: i64, exclude: Option<i64>) -> Result<Option<i64>>;

    /// Insert a link. A duplicate `(team, platform)` pair must be reported as
    /// `AppError::BadRequest` and a second primary as a field error on
    /// `is_primary`.
    async fn insert(&self, record: &SocialRecord) -> Result<Social>;

    /// Overwrite a link; `None` when no row matched. Same error contract as
    /// [`SocialRepository::insert`].
    async fn update(&self, id: i64, record: &SocialRecord) -> Result<Option<Social>>;

    /// Returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// PostgreSQL-backed social link store
pub struct PgSocialRepository {
    pool: PgPool,
}

impl PgSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialRepository for PgSocialRepository {
    async fn find_team(&self, team_id: i64) -> Result<Option<TeamMember>> {
        sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get team member: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Social>, i64)> {
        let socials = sqlx::query_as::<_, Social>(
            "SELECT * FROM team_socials ORDER BY team_id, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list socials: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM team_socials")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count socials: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((socials, total))
    }

    async fn find(&self, id: i64) -> Result<Option<Social>> {
        sqlx::query_as::<_, Social>("SELECT * FROM team_socials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get social: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn other_primary(&self, team_id: i64, exclude: Option<i64>) -> Result<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM team_socials
            WHERE team_id = $1 AND is_primary AND ($2::BIGINT IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(team_id)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check primary social: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, record: &SocialRecord) -> Result<Social> {
        sqlx::query_as::<_, Social>(
            r#"
            INSERT INTO team_socials (team_id, platform, url, is_primary)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(record.team_id)
        .bind(record.platform)
        .bind(&record.url)
        .bind(record.is_primary)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, record))
    }

    async fn update(&self, id: i64, record: &SocialRecord) -> Result<Option<Social>> {
        sqlx::query_as::<_, Social>(
            r#"
            UPDATE team_socials SET
                team_id = $2,
                platform = $3,
                url = $4,
                is_primary = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.team_id)
        .bind(record.platform)
        .bind(&record.url)
        .bind(record.is_primary)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, record))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM team_socials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete social: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map constraint violations raised by a concurrent writer
fn write_error(e: sqlx::Error, record: &SocialRecord) -> AppError {
    match unique_violation(&e) {
        Some(PLATFORM_CONSTRAINT) => {
            return AppError::BadRequest(duplicate_platform_message(record.platform))
        }
        Some(PRIMARY_CONSTRAINT) => return AppError::field("is_primary", PRIMARY_TAKEN_MESSAGE),
        _ => {}
    }
    if is_foreign_key_violation(&e) {
        return AppError::field("team", missing_team_message(record.team_id));
    }
    tracing::error!("Failed to write social: {:?}", e);
    AppError::Database(e)
}
