//! Lookup tables of the partner family (tiers, types, roles, levels)

use sqlx::PgPool;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::partners::dtos::{CreateLookupDto, LookupResponseDto, UpdateLookupDto};
use crate::features::partners::models::{LookupEntry, LookupKind};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{optional_text, required_text};

/// CRUD over one lookup table
pub struct LookupService {
    pool: PgPool,
    kind: LookupKind,
}

impl LookupService {
    pub fn new(pool: PgPool, kind: LookupKind) -> Self {
        Self { pool, kind }
    }

    /// List rows by display order, then name
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<LookupResponseDto>, i64)> {
        let table = self.kind.table();

        let entries = sqlx::query_as::<_, LookupEntry>(&format!(
            "SELECT * FROM {} ORDER BY display_order, name, id LIMIT $1 OFFSET $2",
            table
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list {}: {:?}", table, e);
            AppError::Database(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {}: {:?}", table, e);
                AppError::Database(e)
            })?;

        Ok((entries.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<LookupResponseDto> {
        let entry = sqlx::query_as::<_, LookupEntry>(&format!(
            "SELECT * FROM {} WHERE id = $1",
            self.kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get {} row: {:?}", self.kind.table(), e);
            AppError::Database(e)
        })?;

        entry.map(Into::into).ok_or_else(|| self.not_found(id))
    }

    pub async fn create(&self, dto: CreateLookupDto) -> Result<LookupResponseDto> {
        let name = required_text(&dto.name, "Name").map_err(|msg| AppError::field("name", msg))?;

        let entry = sqlx::query_as::<_, LookupEntry>(&format!(
            r#"
            INSERT INTO {} (name, description, badge_color, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
            self.kind.table()
        ))
        .bind(&name)
        .bind(optional_text(dto.description))
        .bind(optional_text(dto.badge_color))
        .bind(dto.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert {} row: {:?}", self.kind.table(), e);
            AppError::Database(e)
        })?;

        tracing::info!("{} created: id={}, name={}", self.kind.label(), entry.id, entry.name);
        Ok(entry.into())
    }

    /// Partial update: omitted fields keep their stored value
    pub async fn update(&self, id: i64, dto: UpdateLookupDto) -> Result<LookupResponseDto> {
        let name = dto
            .name
            .as_deref()
            .map(|v| required_text(v, "Name"))
            .transpose()
            .map_err(|msg| AppError::field("name", msg))?;

        let entry = sqlx::query_as::<_, LookupEntry>(&format!(
            r#"
            UPDATE {} SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                badge_color = COALESCE($4, badge_color),
                display_order = COALESCE($5, display_order)
            WHERE id = $1
            RETURNING *
            "#,
            self.kind.table()
        ))
        .bind(id)
        .bind(name)
        .bind(dto.description.map(|v| v.trim().to_string()))
        .bind(dto.badge_color.map(|v| v.trim().to_string()))
        .bind(dto.display_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update {} row: {:?}", self.kind.table(), e);
            AppError::Database(e)
        })?;

        let entry = entry.ok_or_else(|| self.not_found(id))?;
        tracing::info!("{} updated: id={}", self.kind.label(), id);
        Ok(entry.into())
    }

    /// Delete a row. Entities referencing it keep existing with the reference cleared.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete {} row: {:?}", self.kind.table(), e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(self.not_found(id));
        }

        tracing::info!("{} deleted: id={}", self.kind.label(), id);
        Ok(())
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::NotFound(format!("{} with id {} not found", self.kind.label(), id))
    }
}

/// Check that an optional lookup reference points at an existing row.
///
/// The outer result carries database failures; the inner one the field message.
pub(crate) async fn check_reference(
    pool: &PgPool,
    kind: LookupKind,
    id: Option<i64>,
) -> Result<std::result::Result<(), String>> {
    let Some(id) = id else {
        return Ok(Ok(()));
    };

    let exists = sqlx::query_scalar::<_, bool>(&format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
        kind.table()
    ))
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to check {} reference: {:?}", kind.table(), e);
        AppError::Database(e)
    })?;

    if exists {
        Ok(Ok(()))
    } else {
        Ok(Err(format!("{} {} does not exist.", kind.label(), id)))
    }
}

/// Map an insert/update failure of an entity referencing lookup rows
pub(crate) fn write_error(entity: &str, e: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        return AppError::BadRequest(format!(
            "A lookup row referenced by this {} no longer exists",
            entity
        ));
    }
    tracing::error!("Failed to write {}: {:?}", entity, e);
    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;

    #[tokio::test]
    async fn test_blank_name_is_rejected_before_database() {
        let service = LookupService::new(lazy_pool(), LookupKind::PartnerTiers);

        let err = service
            .create(CreateLookupDto {
                name: "   ".to_string(),
                description: None,
                badge_color: None,
                display_order: 0,
            })
            .await
            .unwrap_err();

        let AppError::InvalidFields(errors) = err else {
            panic!("expected field error");
        };
        assert_eq!(
            errors.get("name"),
            Some(&["Name cannot be empty.".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_missing_reference_needs_no_query() {
        let outcome = check_reference(&lazy_pool(), LookupKind::SponsorLevels, None)
            .await
            .unwrap();
        assert!(outcome.is_ok());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_lookup_crud_and_ordering(pool: PgPool) {
        let service = LookupService::new(pool.clone(), LookupKind::SponsorLevels);
        let dto = |name: &str, order: i32| CreateLookupDto {
            name: name.to_string(),
            description: None,
            badge_color: Some("#FFD700".to_string()),
            display_order: order,
        };

        let gold = service.create(dto("Gold", 2)).await.unwrap();
        service.create(dto("Diamond", 1)).await.unwrap();
        service.create(dto("Bronze", 2)).await.unwrap();

        let (rows, total) = service.list(&PaginationQuery::default()).await.unwrap();
        assert_eq!(total, 3);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Diamond", "Bronze", "Gold"]);

        let updated = service
            .update(
                gold.id,
                UpdateLookupDto {
                    name: Some(" Gold+ ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Gold+");
        assert_eq!(updated.badge_color.as_deref(), Some("#FFD700"));

        let missing = check_reference(&pool, LookupKind::SponsorLevels, Some(gold.id + 100))
            .await
            .unwrap();
        assert_eq!(
            missing.unwrap_err(),
            format!("Sponsor level {} does not exist.", gold.id + 100)
        );

        service.delete(gold.id).await.unwrap();
        assert!(matches!(
            service.delete(gold.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
