use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::workshops::models::{ExperienceLevel, RegistrationDetail, Workshop, WorkshopRegistration};

fn default_true() -> bool {
    true
}

/// Request DTO for registering to a workshop
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRegistrationDto {
    /// Workshop id
    pub workshop: i64,

    /// Full name; stored trimmed and title-cased
    #[validate(length(max = 255, message = "Name must not exceed 255 characters"))]
    pub user_name: String,

    /// Email; stored trimmed and lower-cased
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub user_email: String,

    pub phone_number: Option<String>,

    #[serde(default = "default_true")]
    pub will_attend_physical: bool,

    #[serde(default)]
    pub django_experience: ExperienceLevel,
}

/// Response DTO for a workshop registration
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationResponseDto {
    pub id: i64,
    /// Workshop id
    pub workshop: i64,
    pub workshop_name: String,
    pub workshop_date: NaiveDate,
    pub user_name: String,
    pub user_email: String,
    pub phone_number: Option<String>,
    pub will_attend_physical: bool,
    pub django_experience: ExperienceLevel,
    pub registration_date: DateTime<Utc>,
}

impl RegistrationResponseDto {
    pub fn new(registration: WorkshopRegistration, workshop: &Workshop) -> Self {
        Self {
            id: registration.id,
            workshop: registration.workshop_id,
            workshop_name: workshop.workshop_name.clone(),
            workshop_date: workshop.workshop_date,
            user_name: registration.user_name,
            user_email: registration.user_email,
            phone_number: registration.phone_number,
            will_attend_physical: registration.will_attend_physical,
            django_experience: registration.django_experience,
            registration_date: registration.registration_date,
        }
    }
}

impl From<RegistrationDetail> for RegistrationResponseDto {
    fn from(detail: RegistrationDetail) -> Self {
        let r = detail.registration;
        Self {
            id: r.id,
            workshop: r.workshop_id,
            workshop_name: detail.workshop_name,
            workshop_date: detail.workshop_date,
            user_name: r.user_name,
            user_email: r.user_email,
            phone_number: r.phone_number,
            will_attend_physical: r.will_attend_physical,
            django_experience: r.django_experience,
            registration_date: r.registration_date,
        }
    }
}
