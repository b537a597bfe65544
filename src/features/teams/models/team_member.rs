use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TeamMember {
    pub id: i64,
    pub full_name: String,
    pub position: String,
    pub bio: Option<String>,
    /// Media path of the profile image
    pub image: Option<String>,
    pub is_active: bool,
    /// Set by the database on insert
    pub join_date: NaiveDate,
}
