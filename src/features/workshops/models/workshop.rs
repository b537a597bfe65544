use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

/// Database model for workshop
#[derive(Debug, Clone, FromRow)]
pub struct Workshop {
    pub id: i64,
    pub workshop_name: String,
    pub workshop_date: NaiveDate,
    pub workshop_time: Option<NaiveTime>,
    pub workshop_location: String,
    pub workshop_description: Option<String>,
    /// Media path of the header image
    pub workshop_image_header: Option<String>,
    pub is_ended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workshop row joined with its registration count
#[derive(Debug, Clone, FromRow)]
pub struct WorkshopWithCount {
    #[sqlx(flatten)]
    pub workshop: Workshop,
    pub registrations_count: i64,
}

/// Someone who registered for a workshop before, target of announcements
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Attendee {
    pub user_name: String,
    pub user_email: String,
}
