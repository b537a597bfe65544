use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::workshops::models::WorkshopWithCount;
use crate::shared::media::MediaUrls;
use crate::shared::types::{default_page, default_page_size, PaginationQuery};

/// Request DTO for creating a workshop
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateWorkshopDto {
    #[validate(length(max = 255, message = "Workshop name must not exceed 255 characters"))]
    pub workshop_name: String,

    /// Date of the workshop (YYYY-MM-DD)
    pub workshop_date: NaiveDate,

    /// Start time (HH:MM:SS). Calendar invites assume 09:00 when absent.
    pub workshop_time: Option<NaiveTime>,

    #[validate(length(max = 255, message = "Location must not exceed 255 characters"))]
    pub workshop_location: String,

    pub workshop_description: Option<String>,

    /// Media path of the header image, relative to MEDIA_BASE_URL
    #[validate(length(max = 255, message = "Image path must not exceed 255 characters"))]
    pub workshop_image_header: Option<String>,

    #[serde(default)]
    pub is_ended: bool,
}

/// Request DTO for updating a workshop. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkshopDto {
    #[validate(length(max = 255, message = "Workshop name must not exceed 255 characters"))]
    pub workshop_name: Option<String>,
    pub workshop_date: Option<NaiveDate>,
    pub workshop_time: Option<NaiveTime>,
    #[validate(length(max = 255, message = "Location must not exceed 255 characters"))]
    pub workshop_location: Option<String>,
    pub workshop_description: Option<String>,
    #[validate(length(max = 255, message = "Image path must not exceed 255 characters"))]
    pub workshop_image_header: Option<String>,
    pub is_ended: Option<bool>,
}

/// Query params for listing workshops
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct WorkshopQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Only ended (true) or upcoming (false) workshops
    pub is_ended: Option<bool>,
}

impl WorkshopQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response DTO for workshop
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkshopResponseDto {
    pub id: i64,
    pub workshop_name: String,
    pub workshop_date: NaiveDate,
    pub workshop_time: Option<NaiveTime>,
    pub workshop_location: String,
    pub workshop_description: Option<String>,
    pub workshop_image_header: Option<String>,
    /// Absolute URL of the header image
    pub workshop_image_header_url: Option<String>,
    pub is_ended: bool,
    pub registrations_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkshopResponseDto {
    pub fn from_row(row: WorkshopWithCount, media: &MediaUrls) -> Self {
        let w = row.workshop;
        Self {
            id: w.id,
            workshop_image_header_url: media.resolve(w.workshop_image_header.as_deref()),
            workshop_name: w.workshop_name,
            workshop_date: w.workshop_date,
            workshop_time: w.workshop_time,
            workshop_location: w.workshop_location,
            workshop_description: w.workshop_description,
            workshop_image_header: w.workshop_image_header,
            is_ended: w.is_ended,
            registrations_count: row.registrations_count,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// Result of announcing a workshop to previous attendees
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnnouncementResultDto {
    pub workshop_id: i64,
    /// Distinct addresses that registered for other workshops
    pub recipients: usize,
    /// Emails handed to the mail transport without error
    pub sent: usize,
}
