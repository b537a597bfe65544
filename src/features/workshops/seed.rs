//! Sample workshops and registrations for local development.
//!
//! Enabled with `SEED_SAMPLE_DATA=true`. Rows are matched by workshop name and
//! by `(workshop, email)`, so running it again creates nothing new.

use chrono::{Duration, NaiveDate};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::workshops::models::ExperienceLevel;

struct SampleWorkshop {
    name: &'static str,
    days_ahead: i64,
    location: &'static str,
    description: &'static str,
}

struct SampleRegistration {
    /// Index into `SAMPLE_WORKSHOPS`
    workshop: usize,
    user_name: &'static str,
    user_email: &'static str,
    will_attend_physical: bool,
    experience: ExperienceLevel,
}

const SAMPLE_WORKSHOPS: [SampleWorkshop; 3] = [
    SampleWorkshop {
        name: "Django Fundamentals",
        days_ahead: 30,
        location: "Tech Hub Building, Room 101",
        description: "Learn the basics of Django web framework. Perfect for beginners who want to start building web apps.",
    },
    SampleWorkshop {
        name: "Advanced Django Patterns",
        days_ahead: 45,
        location: "Innovation Center, Auditorium A",
        description: "Deep dive into advanced Django concepts including custom managers, signals, and design patterns.",
    },
    SampleWorkshop {
        name: "Django REST API Development",
        days_ahead: 60,
        location: "Online Session",
        description: "Build robust REST APIs using Django REST Framework. Covers serializers, viewsets, and authentication.",
    },
];

const SAMPLE_REGISTRATIONS: [SampleRegistration; 4] = [
    SampleRegistration {
        workshop: 0,
        user_name: "Alice Johnson",
        user_email: "alice.johnson@example.com",
        will_attend_physical: true,
        experience: ExperienceLevel::Beginner,
    },
    SampleRegistration {
        workshop: 0,
        user_name: "Bob Smith",
        user_email: "bob.smith@example.com",
        will_attend_physical: true,
        experience: ExperienceLevel::Beginner,
    },
    SampleRegistration {
        workshop: 1,
        user_name: "Charlie Brown",
        user_email: "charlie.brown@example.com",
        will_attend_physical: false,
        experience: ExperienceLevel::Intermediate,
    },
    SampleRegistration {
        workshop: 2,
        user_name: "Diana Prince",
        user_email: "diana.prince@example.com",
        will_attend_physical: true,
        experience: ExperienceLevel::Advanced,
    },
];

/// Rows inserted by one seeding run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub workshops_created: usize,
    pub registrations_created: usize,
}

/// Insert the sample workshops, dated relative to `today`, and their
/// registrations. Existing rows are left untouched.
pub async fn seed_sample_data(pool: &PgPool, today: NaiveDate) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    let mut workshop_ids = Vec::with_capacity(SAMPLE_WORKSHOPS.len());

    for sample in &SAMPLE_WORKSHOPS {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM workshops WHERE workshop_name = $1 ORDER BY id LIMIT 1",
        )
        .bind(sample.name)
        .fetch_optional(pool)
        .await
        .map_err(seed_error)?;

        let id = match existing {
            Some(id) => {
                tracing::info!("Workshop already exists: {}", sample.name);
                id
            }
            None => {
                let id = sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO workshops (
                        workshop_name, workshop_date, workshop_location, workshop_description
                    ) VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(sample.name)
                .bind(today + Duration::days(sample.days_ahead))
                .bind(sample.location)
                .bind(sample.description)
                .fetch_one(pool)
                .await
                .map_err(seed_error)?;
                tracing::info!("Created workshop: {}", sample.name);
                report.workshops_created += 1;
                id
            }
        };
        workshop_ids.push(id);
    }

    for sample in &SAMPLE_REGISTRATIONS {
        let workshop_id = workshop_ids[sample.workshop];
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO workshop_registrations (
                workshop_id, user_name, user_email, will_attend_physical, django_experience
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (workshop_id, user_email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(workshop_id)
        .bind(sample.user_name)
        .bind(sample.user_email)
        .bind(sample.will_attend_physical)
        .bind(sample.experience)
        .fetch_optional(pool)
        .await
        .map_err(seed_error)?;

        let workshop_name = SAMPLE_WORKSHOPS[sample.workshop].name;
        if inserted.is_some() {
            tracing::info!("Created registration: {} -> {}", sample.user_name, workshop_name);
            report.registrations_created += 1;
        } else {
            tracing::info!(
                "Registration already exists: {} -> {}",
                sample.user_name,
                workshop_name
            );
        }
    }

    Ok(report)
}

fn seed_error(e: sqlx::Error) -> AppError {
    tracing::error!("Failed to seed sample data: {:?}", e);
    AppError::Database(e)
}
