/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// WORKSHOP SCHEDULING
// =============================================================================

/// Start hour used when a workshop has no explicit start time
pub const DEFAULT_WORKSHOP_START_HOUR: u32 = 9;

/// Length of every workshop calendar event
pub const WORKSHOP_DURATION_HOURS: i64 = 2;

// =============================================================================
// EXTERNAL ENDPOINTS
// =============================================================================

/// Google Calendar "add event" endpoint
pub const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// File name of the calendar invite attached to confirmation emails
pub const CALENDAR_INVITE_FILENAME: &str = "workshop_invite.ics";
