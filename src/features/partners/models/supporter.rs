use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Supporter {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub contribution_type: Option<String>,
    pub description: Option<String>,
    pub support_date: Option<NaiveDate>,
    pub is_active: bool,
}
