use sqlx::FromRow;

/// Contributor row joined with its role
#[derive(Debug, Clone, FromRow)]
pub struct ContributorRow {
    pub id: i64,
    pub full_name: String,
    pub role_id: Option<i64>,
    pub photo: Option<String>,
    pub bio: Option<String>,
    pub achievements: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub role_name: Option<String>,
    pub role_badge_color: Option<String>,
}
