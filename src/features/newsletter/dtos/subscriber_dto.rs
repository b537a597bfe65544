use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for subscribing to the newsletter
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubscriberDto {
    /// Stored trimmed and lower-cased
    #[validate(length(max = 254, message = "Email must not exceed 254 characters"))]
    pub email: String,

    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,
}

/// Response DTO for newsletter subscriber
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriberResponseDto {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
