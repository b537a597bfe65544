use sqlx::PgPool;

use super::lookup_service::write_error;
use crate::core::error::{AppError, Result};
use crate::features::partners::dtos::{
    CreateSupporterDto, SupporterResponseDto, UpdateSupporterDto,
};
use crate::features::partners::models::Supporter;
use crate::shared::media::MediaUrls;
use crate::shared::types::DirectoryQueryParams;
use crate::shared::validation::{optional_text, required_text};

/// Service for recent supporters (venues, equipment donors, ...)
pub struct SupporterService {
    pool: PgPool,
    media: MediaUrls,
}

impl SupporterService {
    pub fn new(pool: PgPool, media: MediaUrls) -> Self {
        Self { pool, media }
    }

    /// Most recent supporters first; undated ones last
    pub async fn list(
        &self,
        params: &DirectoryQueryParams,
    ) -> Result<(Vec<SupporterResponseDto>, i64)> {
        let pagination = params.pagination();

        let rows = sqlx::query_as::<_, Supporter>(
            r#"
            SELECT * FROM supporters
            WHERE ($1 OR is_active)
            ORDER BY support_date DESC NULLS LAST, name, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(params.include_inactive)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list supporters: {:?}", e);
            AppError::Database(e)
        })?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM supporters WHERE ($1 OR is_active)")
                .bind(params.include_inactive)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count supporters: {:?}", e);
                    AppError::Database(e)
                })?;

        let items = rows
            .into_iter()
            .map(|row| SupporterResponseDto::from_row(row, &self.media))
            .collect();

        Ok((items, total))
    }

    pub async fn get(&self, id: i64) -> Result<SupporterResponseDto> {
        let row = sqlx::query_as::<_, Supporter>("SELECT * FROM supporters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get supporter: {:?}", e);
                AppError::Database(e)
            })?;

        row.map(|r| SupporterResponseDto::from_row(r, &self.media))
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateSupporterDto) -> Result<SupporterResponseDto> {
        let name = required_text(&dto.name, "Name").map_err(|msg| AppError::field("name", msg))?;

        let supporter = sqlx::query_as::<_, Supporter>(
            r#"
            INSERT INTO supporters (
                name, logo, website, contribution_type, description, support_date, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&name)
        .bind(optional_text(dto.logo))
        .bind(optional_text(dto.website))
        .bind(optional_text(dto.contribution_type))
        .bind(optional_text(dto.description))
        .bind(dto.support_date)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("supporter", e))?;

        tracing::info!("Supporter created: id={}", supporter.id);
        Ok(SupporterResponseDto::from_row(supporter, &self.media))
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(&self, id: i64, dto: UpdateSupporterDto) -> Result<SupporterResponseDto> {
        let name = dto
            .name
            .as_deref()
            .map(|v| required_text(v, "Name"))
            .transpose()
            .map_err(|msg| AppError::field("name", msg))?;

        let supporter = sqlx::query_as::<_, Supporter>(
            r#"
            UPDATE supporters SET
                name = COALESCE($2, name),
                logo = COALESCE($3, logo),
                website = COALESCE($4, website),
                contribution_type = COALESCE($5, contribution_type),
                description = COALESCE($6, description),
                support_date = COALESCE($7, support_date),
                is_active = COALESCE($8, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(dto.logo.map(|v| v.trim().to_string()))
        .bind(dto.website.map(|v| v.trim().to_string()))
        .bind(dto.contribution_type.map(|v| v.trim().to_string()))
        .bind(dto.description.map(|v| v.trim().to_string()))
        .bind(dto.support_date)
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("supporter", e))?
        .ok_or_else(|| not_found(id))?;

        tracing::info!("Supporter updated: id={}", id);
        Ok(SupporterResponseDto::from_row(supporter, &self.media))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM supporters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete supporter: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Supporter deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Supporter with id {} not found", id))
}
