use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Self-reported Django experience of a registrant
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "experience_level")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for workshop registration
#[derive(Debug, Clone, FromRow)]
pub struct WorkshopRegistration {
    pub id: i64,
    pub workshop_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub phone_number: Option<String>,
    pub will_attend_physical: bool,
    pub django_experience: ExperienceLevel,
    pub registration_date: DateTime<Utc>,
}

impl WorkshopRegistration {
    pub fn attendance_mode(&self) -> &'static str {
        if self.will_attend_physical {
            "Physical"
        } else {
            "Virtual"
        }
    }
}

/// Registration joined with the workshop fields shown alongside it
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationDetail {
    #[sqlx(flatten)]
    pub registration: WorkshopRegistration,
    pub workshop_name: String,
    pub workshop_date: NaiveDate,
}

/// Normalized registration ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub workshop_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub phone_number: Option<String>,
    pub will_attend_physical: bool,
    pub django_experience: ExperienceLevel,
}
