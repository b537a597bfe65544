use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::notifications::NotificationService;
use crate::features::workshops::dtos::{
    AnnouncementResultDto, CreateWorkshopDto, UpdateWorkshopDto, WorkshopQueryParams,
    WorkshopResponseDto,
};
use crate::features::workshops::models::{Attendee, Workshop, WorkshopWithCount};
use crate::shared::media::MediaUrls;
use crate::shared::validation::{optional_text, required_text, FieldErrors};

const SELECT_WITH_COUNT: &str = r#"
    SELECT w.*,
           (SELECT COUNT(*) FROM workshop_registrations r WHERE r.workshop_id = w.id)
               AS registrations_count
    FROM workshops w
"#;

/// Service for workshop operations
pub struct WorkshopService {
    pool: PgPool,
    media: MediaUrls,
    notifications: Arc<NotificationService>,
}

impl WorkshopService {
    pub fn new(pool: PgPool, media: MediaUrls, notifications: Arc<NotificationService>) -> Self {
        Self {
            pool,
            media,
            notifications,
        }
    }

    /// List workshops by date, optionally filtered on `is_ended`
    pub async fn list(
        &self,
        params: &WorkshopQueryParams,
    ) -> Result<(Vec<WorkshopResponseDto>, i64)> {
        let pagination = params.pagination();

        let rows = sqlx::query_as::<_, WorkshopWithCount>(&format!(
            r#"{}
            WHERE ($1::BOOLEAN IS NULL OR w.is_ended = $1)
            ORDER BY w.workshop_date, w.id
            LIMIT $2 OFFSET $3
            "#,
            SELECT_WITH_COUNT
        ))
        .bind(params.is_ended)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list workshops: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM workshops WHERE ($1::BOOLEAN IS NULL OR is_ended = $1)",
        )
        .bind(params.is_ended)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count workshops: {:?}", e);
            AppError::Database(e)
        })?;

        let items = rows
            .into_iter()
            .map(|row| WorkshopResponseDto::from_row(row, &self.media))
            .collect();

        Ok((items, total))
    }

    pub async fn get(&self, id: i64) -> Result<WorkshopResponseDto> {
        let row = sqlx::query_as::<_, WorkshopWithCount>(&format!(
            "{} WHERE w.id = $1",
            SELECT_WITH_COUNT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get workshop: {:?}", e);
            AppError::Database(e)
        })?;

        row.map(|r| WorkshopResponseDto::from_row(r, &self.media))
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateWorkshopDto) -> Result<WorkshopResponseDto> {
        let (workshop_name, workshop_location) =
            normalize_required(&dto.workshop_name, &dto.workshop_location)?;

        let workshop = sqlx::query_as::<_, Workshop>(
            r#"
            INSERT INTO workshops (
                workshop_name, workshop_date, workshop_time, workshop_location,
                workshop_description, workshop_image_header, is_ended
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&workshop_name)
        .bind(dto.workshop_date)
        .bind(dto.workshop_time)
        .bind(&workshop_location)
        .bind(optional_text(dto.workshop_description))
        .bind(optional_text(dto.workshop_image_header))
        .bind(dto.is_ended)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert workshop: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Workshop created: id={}, name={}", workshop.id, workshop.workshop_name);

        Ok(WorkshopResponseDto::from_row(
            WorkshopWithCount {
                workshop,
                registrations_count: 0,
            },
            &self.media,
        ))
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(&self, id: i64, dto: UpdateWorkshopDto) -> Result<WorkshopResponseDto> {
        let mut errors = FieldErrors::new();
        let workshop_name = dto
            .workshop_name
            .as_deref()
            .and_then(|v| errors.capture("workshop_name", required_text(v, "Workshop name")));
        let workshop_location = dto.workshop_location.as_deref().and_then(|v| {
            errors.capture("workshop_location", required_text(v, "Workshop location"))
        });
        errors.into_result()?;

        let updated = sqlx::query_as::<_, Workshop>(
            r#"
            UPDATE workshops SET
                workshop_name = COALESCE($2, workshop_name),
                workshop_date = COALESCE($3, workshop_date),
                workshop_time = COALESCE($4, workshop_time),
                workshop_location = COALESCE($5, workshop_location),
                workshop_description = COALESCE($6, workshop_description),
                workshop_image_header = COALESCE($7, workshop_image_header),
                is_ended = COALESCE($8, is_ended),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(workshop_name)
        .bind(dto.workshop_date)
        .bind(dto.workshop_time)
        .bind(workshop_location)
        .bind(dto.workshop_description.map(|v| v.trim().to_string()))
        .bind(dto.workshop_image_header.map(|v| v.trim().to_string()))
        .bind(dto.is_ended)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update workshop: {:?}", e);
            AppError::Database(e)
        })?;

        if updated.is_none() {
            return Err(not_found(id));
        }

        tracing::info!("Workshop updated: id={}", id);
        self.get(id).await
    }

    /// Delete a workshop together with its registrations
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM workshops WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete workshop: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Workshop deleted: id={}", id);
        Ok(())
    }

    /// Email everyone who registered for another workshop (and not this one)
    pub async fn announce(&self, id: i64) -> Result<AnnouncementResultDto> {
        let workshop = sqlx::query_as::<_, Workshop>("SELECT * FROM workshops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get workshop: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| not_found(id))?;

        let attendees = self.previous_attendees(id).await?;
        let summary = self
            .notifications
            .announce_workshop(&workshop, attendees)
            .await;

        Ok(AnnouncementResultDto {
            workshop_id: id,
            recipients: summary.recipients,
            sent: summary.sent,
        })
    }

    /// Distinct registrants of other workshops, latest name per address
    async fn previous_attendees(&self, workshop_id: i64) -> Result<Vec<Attendee>> {
        sqlx::query_as::<_, Attendee>(
            r#"
            SELECT DISTINCT ON (user_email) user_name, user_email
            FROM workshop_registrations
            WHERE workshop_id <> $1
              AND user_email NOT IN (
                  SELECT user_email FROM workshop_registrations WHERE workshop_id = $1
              )
            ORDER BY user_email, registration_date DESC
            "#,
        )
        .bind(workshop_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list previous attendees: {:?}", e);
            AppError::Database(e)
        })
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Workshop with id {} not found", id))
}

/// Trimmed name and location of a new workshop
fn normalize_required(
    name: &str,
    location: &str,
) -> std::result::Result<(String, String), FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = errors.capture("workshop_name", required_text(name, "Workshop name"));
    let location = errors.capture(
        "workshop_location",
        required_text(location, "Workshop location"),
    );

    match (name, location) {
        (Some(name), Some(location)) => Ok((name, location)),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::workshops::dtos::CreateRegistrationDto;
    use crate::features::workshops::models::ExperienceLevel;
    use crate::features::workshops::services::{PgRegistrationRepository, RegistrationService};
    use crate::modules::mail::LogMailer;
    use crate::shared::templates::TemplateRenderer;
    use chrono::NaiveDate;

    #[test]
    fn test_normalize_required_trims_and_collects() {
        assert_eq!(
            normalize_required("  Intro ", " Hall A ").unwrap(),
            ("Intro".to_string(), "Hall A".to_string())
        );

        let errors = normalize_required("  ", "").unwrap_err();
        assert_eq!(
            errors.get("workshop_name"),
            Some(&["Workshop name cannot be empty.".to_string()][..])
        );
        assert_eq!(
            errors.get("workshop_location"),
            Some(&["Workshop location cannot be empty.".to_string()][..])
        );
    }

    fn notifications() -> Arc<NotificationService> {
        Arc::new(NotificationService::new(
            Arc::new(LogMailer),
            Arc::new(TemplateRenderer::empty()),
            "Django Campus",
        ))
    }

    fn create_dto(name: &str) -> CreateWorkshopDto {
        CreateWorkshopDto {
            workshop_name: name.to_string(),
            workshop_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            workshop_time: None,
            workshop_location: "Main Hall".to_string(),
            workshop_description: None,
            workshop_image_header: Some("workshops/intro.png".to_string()),
            is_ended: false,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_counts_and_cascade_delete(pool: PgPool) {
        let workshops = WorkshopService::new(
            pool.clone(),
            MediaUrls::new("http://media.test"),
            notifications(),
        );
        let registrations = RegistrationService::new(
            Arc::new(PgRegistrationRepository::new(pool.clone())),
            notifications(),
        );

        let workshop = workshops.create(create_dto("Intro")).await.unwrap();
        assert_eq!(
            workshop.workshop_image_header_url.as_deref(),
            Some("http://media.test/workshops/intro.png")
        );

        let registered = registrations
            .register(CreateRegistrationDto {
                workshop: workshop.id,
                user_name: "ada lovelace".to_string(),
                user_email: "Ada@Example.com".to_string(),
                phone_number: None,
                will_attend_physical: false,
                django_experience: ExperienceLevel::Advanced,
            })
            .await
            .unwrap();
        registered.notification.await.unwrap();

        assert_eq!(workshops.get(workshop.id).await.unwrap().registrations_count, 1);

        workshops.delete(workshop.id).await.unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workshop_registrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_is_partial_and_filters_apply(pool: PgPool) {
        let workshops = WorkshopService::new(pool, MediaUrls::new("http://media.test"), notifications());
        let created = workshops.create(create_dto("Intro")).await.unwrap();

        let updated = workshops
            .update(
                created.id,
                UpdateWorkshopDto {
                    is_ended: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_ended);
        assert_eq!(updated.workshop_name, "Intro");

        let params = WorkshopQueryParams {
            page: 1,
            page_size: 20,
            is_ended: Some(false),
        };
        let (items, total) = workshops.list(&params).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 0);

        assert!(matches!(
            workshops.update(9999, UpdateWorkshopDto::default()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
