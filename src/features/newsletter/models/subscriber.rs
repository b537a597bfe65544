use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::newsletter::dtos::SubscriberResponseDto;

/// Database model for newsletter subscriber
#[derive(Debug, Clone, FromRow)]
pub struct NewsletterSubscriber {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewsletterSubscriber> for SubscriberResponseDto {
    fn from(s: NewsletterSubscriber) -> Self {
        Self {
            id: s.id,
            email: s.email,
            name: s.name,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
