use chrono::NaiveDate;
use sqlx::FromRow;

/// Partner row joined with its tier and type names
#[derive(Debug, Clone, FromRow)]
pub struct PartnerRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub tier_id: Option<i64>,
    pub partner_type_id: Option<i64>,
    pub partnership_date: NaiveDate,
    pub is_active: bool,
    pub display_order: i32,
    pub tier_name: Option<String>,
    pub tier_badge_color: Option<String>,
    pub partner_type_name: Option<String>,
}
