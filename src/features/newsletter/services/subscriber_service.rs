//! Newsletter subscriptions

use sqlx::PgPool;

use crate::core::database::unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::newsletter::dtos::{CreateSubscriberDto, SubscriberResponseDto};
use crate::features::newsletter::models::NewsletterSubscriber;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{normalize_email, optional_text};

pub const ALREADY_SUBSCRIBED_MESSAGE: &str = "This email is already subscribed to our newsletter.";

pub struct SubscriberService {
    pool: PgPool,
}

impl SubscriberService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<SubscriberResponseDto>, i64)> {
        let subscribers = sqlx::query_as::<_, NewsletterSubscriber>(
            r#"
            SELECT * FROM newsletter_subscribers
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list subscribers: {:?}", e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM newsletter_subscribers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count subscribers: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((subscribers.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<SubscriberResponseDto> {
        let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
            "SELECT * FROM newsletter_subscribers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get subscriber: {:?}", e);
            AppError::Database(e)
        })?;

        subscriber
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    /// Subscribe an address. Each address can subscribe once.
    pub async fn subscribe(&self, dto: CreateSubscriberDto) -> Result<SubscriberResponseDto> {
        let email = normalize_email(&dto.email).map_err(|msg| AppError::field("email", msg))?;
        let name = optional_text(dto.name);

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM newsletter_subscribers WHERE email = $1)",
        )
        .bind(&email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check subscriber: {:?}", e);
            AppError::Database(e)
        })?;

        if exists {
            return Err(AppError::field("email", ALREADY_SUBSCRIBED_MESSAGE));
        }

        let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
            r#"
            INSERT INTO newsletter_subscribers (email, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(&name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                return AppError::field("email", ALREADY_SUBSCRIBED_MESSAGE);
            }
            tracing::error!("Failed to insert subscriber: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Newsletter subscriber added: id={}", subscriber.id);

        Ok(subscriber.into())
    }

    /// Unsubscribe
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete subscriber: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Newsletter subscriber removed: id={}", id);
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Subscriber with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(email: &str, name: Option<&str>) -> CreateSubscriberDto {
        CreateSubscriberDto {
            email: email.to_string(),
            name: name.map(str::to_string),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_subscribe_normalizes_and_rejects_duplicates(pool: PgPool) {
        let service = SubscriberService::new(pool);

        let created = service
            .subscribe(dto("  News@Example.COM ", Some("  Ada ")))
            .await
            .unwrap();
        assert_eq!(created.email, "news@example.com");
        assert_eq!(created.name.as_deref(), Some("Ada"));

        let Err(AppError::InvalidFields(errors)) =
            service.subscribe(dto("news@example.com", None)).await
        else {
            panic!("expected field error");
        };
        assert_eq!(
            errors.get("email"),
            Some(&[ALREADY_SUBSCRIBED_MESSAGE.to_string()][..])
        );

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
