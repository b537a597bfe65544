use sqlx::PgPool;

use super::lookup_service::{check_reference, write_error};
use crate::core::error::{AppError, Result};
use crate::features::partners::dtos::{CreateSponsorDto, SponsorResponseDto, UpdateSponsorDto};
use crate::features::partners::models::{LookupKind, SponsorRow};
use crate::shared::media::MediaUrls;
use crate::shared::types::DirectoryQueryParams;
use crate::shared::validation::{optional_text, required_text, FieldErrors};

const SELECT_SPONSOR: &str = r#"
    SELECT s.*,
           l.name AS level_name,
           l.badge_color AS level_badge_color
    FROM sponsors s
    LEFT JOIN sponsor_levels l ON l.id = s.level_id
"#;

/// Service for financial sponsors
pub struct SponsorService {
    pool: PgPool,
    media: MediaUrls,
}

impl SponsorService {
    pub fn new(pool: PgPool, media: MediaUrls) -> Self {
        Self { pool, media }
    }

    pub async fn list(
        &self,
        params: &DirectoryQueryParams,
    ) -> Result<(Vec<SponsorResponseDto>, i64)> {
        let pagination = params.pagination();

        let rows = sqlx::query_as::<_, SponsorRow>(&format!(
            r#"{}
            WHERE ($1 OR s.is_active)
            ORDER BY s.display_order, s.name, s.id
            LIMIT $2 OFFSET $3
            "#,
            SELECT_SPONSOR
        ))
        .bind(params.include_inactive)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sponsors: {:?}", e);
            AppError::Database(e)
        })?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sponsors WHERE ($1 OR is_active)")
                .bind(params.include_inactive)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count sponsors: {:?}", e);
                    AppError::Database(e)
                })?;

        let items = rows
            .into_iter()
            .map(|row| SponsorResponseDto::from_row(row, &self.media))
            .collect();

        Ok((items, total))
    }

    pub async fn get(&self, id: i64) -> Result<SponsorResponseDto> {
        let row = sqlx::query_as::<_, SponsorRow>(&format!("{} WHERE s.id = $1", SELECT_SPONSOR))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get sponsor: {:?}", e);
                AppError::Database(e)
            })?;

        row.map(|r| SponsorResponseDto::from_row(r, &self.media))
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateSponsorDto) -> Result<SponsorResponseDto> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", required_text(&dto.name, "Name"));
        let level_check = check_reference(&self.pool, LookupKind::SponsorLevels, dto.level).await?;
        errors.capture("level", level_check);
        errors.into_result()?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sponsors (
                name, logo, website, level_id, description, sponsored_since,
                is_active, display_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(optional_text(dto.logo))
        .bind(optional_text(dto.website))
        .bind(dto.level)
        .bind(optional_text(dto.description))
        .bind(dto.sponsored_since)
        .bind(dto.is_active)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("sponsor", e))?;

        tracing::info!("Sponsor created: id={}", id);
        self.get(id).await
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(&self, id: i64, dto: UpdateSponsorDto) -> Result<SponsorResponseDto> {
        let mut errors = FieldErrors::new();
        let name = dto
            .name
            .as_deref()
            .and_then(|v| errors.capture("name", required_text(v, "Name")));
        let level_check = check_reference(&self.pool, LookupKind::SponsorLevels, dto.level).await?;
        errors.capture("level", level_check);
        errors.into_result()?;

        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE sponsors SET
                name = COALESCE($2, name),
                logo = COALESCE($3, logo),
                website = COALESCE($4, website),
                level_id = COALESCE($5, level_id),
                description = COALESCE($6, description),
                sponsored_since = COALESCE($7, sponsored_since),
                is_active = COALESCE($8, is_active),
                display_order = COALESCE($9, display_order)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(dto.logo.map(|v| v.trim().to_string()))
        .bind(dto.website.map(|v| v.trim().to_string()))
        .bind(dto.level)
        .bind(dto.description.map(|v| v.trim().to_string()))
        .bind(dto.sponsored_since)
        .bind(dto.is_active)
        .bind(dto.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("sponsor", e))?;

        if updated.is_none() {
            return Err(not_found(id));
        }

        tracing::info!("Sponsor updated: id={}", id);
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM sponsors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete sponsor: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Sponsor deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Sponsor with id {} not found", id))
}
