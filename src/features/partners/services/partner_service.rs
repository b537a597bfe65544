use sqlx::PgPool;

use super::lookup_service::{check_reference, write_error};
use crate::core::error::{AppError, Result};
use crate::features::partners::dtos::{CreatePartnerDto, PartnerResponseDto, UpdatePartnerDto};
use crate::features::partners::models::{LookupKind, PartnerRow};
use crate::shared::media::MediaUrls;
use crate::shared::types::DirectoryQueryParams;
use crate::shared::validation::{optional_text, required_text, FieldErrors};

const SELECT_PARTNER: &str = r#"
    SELECT p.*,
           t.name AS tier_name,
           t.badge_color AS tier_badge_color,
           pt.name AS partner_type_name
    FROM partners p
    LEFT JOIN partner_tiers t ON t.id = p.tier_id
    LEFT JOIN partner_types pt ON pt.id = p.partner_type_id
"#;

/// Service for strategic partners
pub struct PartnerService {
    pool: PgPool,
    media: MediaUrls,
}

impl PartnerService {
    pub fn new(pool: PgPool, media: MediaUrls) -> Self {
        Self { pool, media }
    }

    /// Active partners by display order and name
    pub async fn list(
        &self,
        params: &DirectoryQueryParams,
    ) -> Result<(Vec<PartnerResponseDto>, i64)> {
        let pagination = params.pagination();

        let rows = sqlx::query_as::<_, PartnerRow>(&format!(
            r#"{}
            WHERE ($1 OR p.is_active)
            ORDER BY p.display_order, p.name, p.id
            LIMIT $2 OFFSET $3
            "#,
            SELECT_PARTNER
        ))
        .bind(params.include_inactive)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list partners: {:?}", e);
            AppError::Database(e)
        })?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM partners WHERE ($1 OR is_active)")
                .bind(params.include_inactive)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count partners: {:?}", e);
                    AppError::Database(e)
                })?;

        let items = rows
            .into_iter()
            .map(|row| PartnerResponseDto::from_row(row, &self.media))
            .collect();

        Ok((items, total))
    }

    pub async fn get(&self, id: i64) -> Result<PartnerResponseDto> {
        let row = sqlx::query_as::<_, PartnerRow>(&format!("{} WHERE p.id = $1", SELECT_PARTNER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get partner: {:?}", e);
                AppError::Database(e)
            })?;

        row.map(|r| PartnerResponseDto::from_row(r, &self.media))
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreatePartnerDto) -> Result<PartnerResponseDto> {
        let mut errors = FieldErrors::new();
        let name = errors.capture("name", required_text(&dto.name, "Name"));
        let description = errors.capture("description", required_text(&dto.description, "Description"));
        self.check_references(&mut errors, dto.tier, dto.partner_type)
            .await?;
        errors.into_result()?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO partners (
                name, description, logo, website, tier_id, partner_type_id,
                partnership_date, is_active, display_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(optional_text(dto.logo))
        .bind(optional_text(dto.website))
        .bind(dto.tier)
        .bind(dto.partner_type)
        .bind(dto.partnership_date)
        .bind(dto.is_active)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("partner", e))?;

        tracing::info!("Partner created: id={}", id);
        self.get(id).await
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(&self, id: i64, dto: UpdatePartnerDto) -> Result<PartnerResponseDto> {
        let mut errors = FieldErrors::new();
        let name = dto
            .name
            .as_deref()
            .and_then(|v| errors.capture("name", required_text(v, "Name")));
        let description = dto
            .description
            .as_deref()
            .and_then(|v| errors.capture("description", required_text(v, "Description")));
        self.check_references(&mut errors, dto.tier, dto.partner_type)
            .await?;
        errors.into_result()?;

        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE partners SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                logo = COALESCE($4, logo),
                website = COALESCE($5, website),
                tier_id = COALESCE($6, tier_id),
                partner_type_id = COALESCE($7, partner_type_id),
                partnership_date = COALESCE($8, partnership_date),
                is_active = COALESCE($9, is_active),
                display_order = COALESCE($10, display_order)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(dto.logo.map(|v| v.trim().to_string()))
        .bind(dto.website.map(|v| v.trim().to_string()))
        .bind(dto.tier)
        .bind(dto.partner_type)
        .bind(dto.partnership_date)
        .bind(dto.is_active)
        .bind(dto.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("partner", e))?;

        if updated.is_none() {
            return Err(not_found(id));
        }

        tracing::info!("Partner updated: id={}", id);
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete partner: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Partner deleted: id={}", id);
        Ok(())
    }

    async fn check_references(
        &self,
        errors: &mut FieldErrors,
        tier: Option<i64>,
        partner_type: Option<i64>,
    ) -> Result<()> {
        let tier_check = check_reference(&self.pool, LookupKind::PartnerTiers, tier).await?;
        errors.capture("tier", tier_check);
        let type_check =
            check_reference(&self.pool, LookupKind::PartnerTypes, partner_type).await?;
        errors.capture("partner_type", type_check);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Partner with id {} not found", id))
}
