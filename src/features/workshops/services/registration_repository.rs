//! Storage seam for registrations.
//!
//! `RegistrationService` only talks to this trait so the registration flow
//! can run against an in-memory store in tests.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::{is_foreign_key_violation, unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::workshops::models::{
    NewRegistration, RegistrationDetail, Workshop, WorkshopRegistration,
};

/// Message returned when a `(workshop, email)` pair is already registered
pub const DUPLICATE_REGISTRATION_MESSAGE: &str = "You are already registered for this workshop.";

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find_workshop(&self, workshop_id: i64) -> Result<Option<Workshop>>;

    async fn registration_exists(&self, workshop_id: i64, user_email: &str) -> Result<bool>;

    /// Insert a registration. A duplicate `(workshop, email)` pair must be
    /// reported as `AppError::BadRequest`
    /// carrying [`DUPLICATE_REGISTRATION_MESSAGE`].
    async fn insert(&self, registration: &NewRegistration) -> Result<WorkshopRegistration>;

    /// Page of registrations, optionally restricted to one workshop, plus the
    /// total number of matching rows
    async fn list(
        &self,
        workshop_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RegistrationDetail>, i64)>;

    async fn find(&self, id: i64) -> Result<Option<RegistrationDetail>>;

    /// Returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// PostgreSQL-backed registration store
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn find_workshop(&self, workshop_id: i64) -> Result<Option<Workshop>> {
        sqlx::query_as::<_, Workshop>("SELECT * FROM workshops WHERE id = $1")
            .bind(workshop_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get workshop: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn registration_exists(&self, workshop_id: i64, user_email: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM workshop_registrations
                WHERE workshop_id = $1 AND user_email = $2
            )
            "#,
        )
        .bind(workshop_id)
        .bind(user_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check existing registration: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, registration: &NewRegistration) -> Result<WorkshopRegistration> {
        sqlx::query_as::<_, WorkshopRegistration>(
            r#"
            INSERT INTO workshop_registrations (
                workshop_id, user_name, user_email, phone_number,
                will_attend_physical, django_experience
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(registration.workshop_id)
        .bind(&registration.user_name)
        .bind(&registration.user_email)
        .bind(&registration.phone_number)
        .bind(registration.will_attend_physical)
        .bind(registration.django_experience)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                return AppError::BadRequest(DUPLICATE_REGISTRATION_MESSAGE.to_string());
            }
            if is_foreign_key_violation(&e) {
                return AppError::field(
                    "workshop",
                    format!("Workshop {} does not exist.", registration.workshop_id),
                );
            }
            tracing::error!("Failed to insert registration: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(
        &self,
        workshop_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RegistrationDetail>, i64)> {
        let items = sqlx::query_as::<_, RegistrationDetail>(
            r#"
            SELECT r.*, w.workshop_name, w.workshop_date
            FROM workshop_registrations r
            JOIN workshops w ON w.id = r.workshop_id
            WHERE ($1::BIGINT IS NULL OR r.workshop_id = $1)
            ORDER BY r.registration_date, r.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(workshop_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list registrations: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM workshop_registrations
            WHERE ($1::BIGINT IS NULL OR workshop_id = $1)
            "#,
        )
        .bind(workshop_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count registrations: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((items, total))
    }

    async fn find(&self, id: i64) -> Result<Option<RegistrationDetail>> {
        sqlx::query_as::<_, RegistrationDetail>(
            r#"
            SELECT r.*, w.workshop_name, w.workshop_date
            FROM workshop_registrations r
            JOIN workshops w ON w.id = r.workshop_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get registration: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workshop_registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete registration: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
