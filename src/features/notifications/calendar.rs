//! Calendar invites for workshops.
//!
//! Events use floating local times (no time zone): the workshop date plus its
//! start time, or 09:00 when none is set, lasting two hours.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike, Property};

use crate::features::workshops::models::{Workshop, WorkshopRegistration};
use crate::shared::constants::{
    DEFAULT_WORKSHOP_START_HOUR, GOOGLE_CALENDAR_RENDER_URL, WORKSHOP_DURATION_HOURS,
};

const ICS_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub description: String,
}

/// Start of a workshop as a floating local time
pub fn workshop_start(workshop: &Workshop) -> NaiveDateTime {
    let time = workshop.workshop_time.unwrap_or_else(|| {
        NaiveTime::from_hms_opt(DEFAULT_WORKSHOP_START_HOUR, 0, 0).unwrap_or_default()
    });
    workshop.workshop_date.and_time(time)
}

pub fn workshop_end(workshop: &Workshop) -> NaiveDateTime {
    workshop_start(workshop) + Duration::hours(WORKSHOP_DURATION_HOURS)
}

impl CalendarEvent {
    /// Event sent to a registrant
    pub fn for_registration(
        workshop: &Workshop,
        registration: &WorkshopRegistration,
        organization_name: &str,
    ) -> Self {
        let description = format!(
            "Workshop: {}\nLocation: {}\nAttendance: {}\n\n{}\n\nOrganized by {}\nWe look forward to seeing you!",
            workshop.workshop_name,
            workshop.workshop_location,
            registration.attendance_mode(),
            workshop.workshop_description.as_deref().unwrap_or(""),
            organization_name,
        );

        Self {
            uid: format!(
                "workshop-{}-registration-{}@{}",
                workshop.id,
                registration.id,
                uid_domain(organization_name)
            ),
            title: workshop.workshop_name.clone(),
            start: workshop_start(workshop),
            end: workshop_end(workshop),
            location: workshop.workshop_location.clone(),
            description,
        }
    }

    /// Render as an RFC 5545 `VCALENDAR` document holding this event
    pub fn to_ics(&self, organization_name: &str, stamp: DateTime<Utc>) -> String {
        let event = Event::new()
            .uid(&self.uid)
            .timestamp(stamp)
            .summary(&self.title)
            .location(&self.location)
            .description(&self.description)
            .starts(CalendarDateTime::Floating(self.start))
            .ends(CalendarDateTime::Floating(self.end))
            .done();

        Calendar::new()
            .name(organization_name)
            .append_property(Property::new("METHOD", "PUBLISH"))
            .push(event)
            .done()
            .to_string()
    }
}

/// "Add to Google Calendar" link for a registration
pub fn google_calendar_link(
    workshop: &Workshop,
    registration: &WorkshopRegistration,
    organization_name: &str,
) -> String {
    let dates = format!(
        "{}/{}",
        workshop_start(workshop).format(ICS_TIME_FORMAT),
        workshop_end(workshop).format(ICS_TIME_FORMAT)
    );
    let details = format!(
        "Workshop: {}\nAttendance: {}\nExperience Level: {}\n\n{}\n\nOrganized by {}",
        workshop.workshop_name,
        registration.attendance_mode(),
        registration.django_experience,
        workshop.workshop_description.as_deref().unwrap_or(""),
        organization_name,
    );

    format!(
        "{}?action=TEMPLATE&text={}&dates={}&details={}&location={}",
        GOOGLE_CALENDAR_RENDER_URL,
        urlencoding::encode(&workshop.workshop_name),
        urlencoding::encode(&dates),
        urlencoding::encode(&details),
        urlencoding::encode(&workshop.workshop_location),
    )
}

/// Domain part for event UIDs, derived from the organization name
fn uid_domain(organization_name: &str) -> String {
    let slug: String = organization_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        "workshops.local".to_string()
    } else {
        format!("{}.workshops", slug)
    }
}
