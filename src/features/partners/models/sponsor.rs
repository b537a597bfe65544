use chrono::NaiveDate;
use sqlx::FromRow;

/// Sponsor row joined with its level
#[derive(Debug, Clone, FromRow)]
pub struct SponsorRow {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub level_id: Option<i64>,
    pub description: Option<String>,
    pub sponsored_since: Option<NaiveDate>,
    pub is_active: bool,
    pub display_order: i32,
    pub level_name: Option<String>,
    pub level_badge_color: Option<String>,
}
