use sqlx::PgPool;

use super::lookup_service::{check_reference, write_error};
use crate::core::error::{AppError, Result};
use crate::features::partners::dtos::{
    ContributorResponseDto, CreateContributorDto, UpdateContributorDto,
};
use crate::features::partners::models::{ContributorRow, LookupKind};
use crate::shared::media::MediaUrls;
use crate::shared::types::DirectoryQueryParams;
use crate::shared::validation::{optional_text, required_text, FieldErrors};

const SELECT_CONTRIBUTOR: &str = r#"
    SELECT c.*,
           r.name AS role_name,
           r.badge_color AS role_badge_color
    FROM contributors c
    LEFT JOIN contributor_roles r ON r.id = c.role_id
"#;

/// Service for volunteers and mentors
pub struct ContributorService {
    pool: PgPool,
    media: MediaUrls,
}

impl ContributorService {
    pub fn new(pool: PgPool, media: MediaUrls) -> Self {
        Self { pool, media }
    }

    pub async fn list(
        &self,
        params: &DirectoryQueryParams,
    ) -> Result<(Vec<ContributorResponseDto>, i64)> {
        let pagination = params.pagination();

        let rows = sqlx::query_as::<_, ContributorRow>(&format!(
            r#"{}
            WHERE ($1 OR c.is_active)
            ORDER BY c.display_order, c.full_name, c.id
            LIMIT $2 OFFSET $3
            "#,
            SELECT_CONTRIBUTOR
        ))
        .bind(params.include_inactive)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list contributors: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contributors WHERE ($1 OR is_active)",
        )
        .bind(params.include_inactive)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count contributors: {:?}", e);
            AppError::Database(e)
        })?;

        let items = rows
            .into_iter()
            .map(|row| ContributorResponseDto::from_row(row, &self.media))
            .collect();

        Ok((items, total))
    }

    pub async fn get(&self, id: i64) -> Result<ContributorResponseDto> {
        let row = sqlx::query_as::<_, ContributorRow>(&format!(
            "{} WHERE c.id = $1",
            SELECT_CONTRIBUTOR
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get contributor: {:?}", e);
            AppError::Database(e)
        })?;

        row.map(|r| ContributorResponseDto::from_row(r, &self.media))
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateContributorDto) -> Result<ContributorResponseDto> {
        let mut errors = FieldErrors::new();
        let full_name = errors.capture("full_name", required_text(&dto.full_name, "Full name"));
        let role_check = check_reference(&self.pool, LookupKind::ContributorRoles, dto.role).await?;
        errors.capture("role", role_check);
        errors.into_result()?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contributors (
                full_name, role_id, photo, bio, achievements, linkedin, github,
                twitter, website, email, is_active, display_order
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(full_name)
        .bind(dto.role)
        .bind(optional_text(dto.photo))
        .bind(optional_text(dto.bio))
        .bind(optional_text(dto.achievements))
        .bind(optional_text(dto.linkedin))
        .bind(optional_text(dto.github))
        .bind(optional_text(dto.twitter))
        .bind(optional_text(dto.website))
        .bind(optional_text(dto.email).map(|e| e.to_lowercase()))
        .bind(dto.is_active)
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("contributor", e))?;

        tracing::info!("Contributor created: id={}", id);
        self.get(id).await
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(
        &self,
        id: i64,
        dto: UpdateContributorDto,
    ) -> Result<ContributorResponseDto> {
        let mut errors = FieldErrors::new();
        let full_name = dto
            .full_name
            .as_deref()
            .and_then(|v| errors.capture("full_name", required_text(v, "Full name")));
        let role_check = check_reference(&self.pool, LookupKind::ContributorRoles, dto.role).await?;
        errors.capture("role", role_check);
        errors.into_result()?;

        let trimmed = |v: Option<String>| v.map(|v| v.trim().to_string());

        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE contributors SET
                full_name = COALESCE($2, full_name),
                role_id = COALESCE($3, role_id),
                photo = COALESCE($4, photo),
                bio = COALESCE($5, bio),
                achievements = COALESCE($6, achievements),
                linkedin = COALESCE($7, linkedin),
                github = COALESCE($8, github),
                twitter = COALESCE($9, twitter),
                website = COALESCE($10, website),
                email = COALESCE($11, email),
                is_active = COALESCE($12, is_active),
                display_order = COALESCE($13, display_order)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(dto.role)
        .bind(trimmed(dto.photo))
        .bind(trimmed(dto.bio))
        .bind(trimmed(dto.achievements))
        .bind(trimmed(dto.linkedin))
        .bind(trimmed(dto.github))
        .bind(trimmed(dto.twitter))
        .bind(trimmed(dto.website))
        .bind(trimmed(dto.email).map(|e| e.to_lowercase()))
        .bind(dto.is_active)
        .bind(dto.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("contributor", e))?;

        if updated.is_none() {
            return Err(not_found(id));
        }

        tracing::info!("Contributor updated: id={}", id);
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM contributors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete contributor: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Contributor deleted: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Contributor with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::partners::dtos::CreateLookupDto;
    use crate::features::partners::services::LookupService;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_contributor_with_role(pool: PgPool) {
        let roles = LookupService::new(pool.clone(), LookupKind::ContributorRoles);
        let mentor = roles
            .create(CreateLookupDto {
                name: "Technical Mentor".to_string(),
                description: None,
                badge_color: Some("blue".to_string()),
                display_order: 0,
            })
            .await
            .unwrap();

        let service = ContributorService::new(pool, MediaUrls::new("http://media.test"));
        let created = service
            .create(CreateContributorDto {
                full_name: " Grace Hopper ".to_string(),
                role: Some(mentor.id),
                photo: None,
                bio: Some("Compilers".to_string()),
                achievements: Some("Organized 5 workshops".to_string()),
                linkedin: None,
                github: Some("https://github.com/grace".to_string()),
                twitter: None,
                website: Some(String::new()),
                email: Some("  Grace@Example.com ".to_string()),
                is_active: true,
                display_order: 0,
            })
            .await
            .unwrap();

        assert_eq!(created.full_name, "Grace Hopper");
        assert_eq!(created.role_name.as_deref(), Some("Technical Mentor"));
        assert_eq!(created.role_badge_color.as_deref(), Some("blue"));
        assert_eq!(created.email.as_deref(), Some("grace@example.com"));
        assert_eq!(created.website, None);
        assert_eq!(created.photo_url, None);

        let updated = service
            .update(
                created.id,
                UpdateContributorDto {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated.is_active);
        assert_eq!(updated.bio.as_deref(), Some("Compilers"));

        let (active, _) = service.list(&DirectoryQueryParams::default()).await.unwrap();
        assert!(active.is_empty());
    }
}
