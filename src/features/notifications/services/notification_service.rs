//! Workshop emails: registration confirmations with a calendar invite, and
//! announcements of new workshops to previous attendees.
//!
//! Delivery is best-effort. Template problems fall back to plain text and
//! transport errors are logged; nothing here returns an error to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::{stream, StreamExt};
use serde::Serialize;

use crate::features::notifications::calendar::{google_calendar_link, CalendarEvent};
use crate::features::workshops::models::{Attendee, Workshop, WorkshopRegistration};
use crate::modules::mail::{EmailAttachment, Mailer, OutgoingEmail};
use crate::shared::constants::CALENDAR_INVITE_FILENAME;
use crate::shared::templates::TemplateRenderer;

pub const REGISTRATION_HTML_TEMPLATE: &str = "emails/workshop_registration.html.jinja";
pub const REGISTRATION_TEXT_TEMPLATE: &str = "emails/workshop_registration.txt.jinja";
pub const ANNOUNCEMENT_HTML_TEMPLATE: &str = "emails/workshop_announcement.html.jinja";
pub const ANNOUNCEMENT_TEXT_TEMPLATE: &str = "emails/workshop_announcement.txt.jinja";

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8; method=PUBLISH";

/// Announcement emails in flight at once
const ANNOUNCEMENT_CONCURRENCY: usize = 4;

/// Receives successfully stored registrations
#[async_trait]
pub trait RegistrationNotifier: Send + Sync {
    /// Attempt to deliver the confirmation. Returns whether the email was sent.
    async fn registration_confirmed(
        &self,
        workshop: &Workshop,
        registration: &WorkshopRegistration,
    ) -> bool;
}

/// Outcome of an announcement run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnouncementSummary {
    pub recipients: usize,
    pub sent: usize,
}

#[derive(Serialize)]
struct WorkshopContext<'a> {
    id: i64,
    name: &'a str,
    date: String,
    time: String,
    location: &'a str,
    description: Option<&'a str>,
}

impl<'a> WorkshopContext<'a> {
    fn new(workshop: &'a Workshop) -> Self {
        Self {
            id: workshop.id,
            name: &workshop.workshop_name,
            date: workshop.workshop_date.format("%A, %B %-d, %Y").to_string(),
            time: workshop
                .workshop_time
                .map(|t| t.format("%-I:%M %p").to_string())
                .unwrap_or_else(|| "9:00 AM".to_string()),
            location: &workshop.workshop_location,
            description: workshop.workshop_description.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct RegistrationEmailContext<'a> {
    organization_name: &'a str,
    name: &'a str,
    workshop: WorkshopContext<'a>,
    attendance_mode: &'a str,
    django_experience: &'a str,
    add_to_google_calendar_url: &'a str,
}

#[derive(Serialize)]
struct AnnouncementEmailContext<'a> {
    organization_name: &'a str,
    name: &'a str,
    workshop: WorkshopContext<'a>,
}

pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    templates: Arc<TemplateRenderer>,
    organization_name: String,
}

impl NotificationService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        templates: Arc<TemplateRenderer>,
        organization_name: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            templates,
            organization_name: organization_name.into(),
        }
    }

    /// Confirmation email with HTML/plain bodies and the `.ics` invite
    pub fn compose_registration_email(
        &self,
        workshop: &Workshop,
        registration: &WorkshopRegistration,
    ) -> OutgoingEmail {
        let calendar_url = google_calendar_link(workshop, registration, &self.organization_name);
        let ctx = RegistrationEmailContext {
            organization_name: &self.organization_name,
            name: &registration.user_name,
            workshop: WorkshopContext::new(workshop),
            attendance_mode: registration.attendance_mode(),
            django_experience: registration.django_experience.as_str(),
            add_to_google_calendar_url: &calendar_url,
        };

        let html_body = self.render_optional(REGISTRATION_HTML_TEMPLATE, &ctx);
        let text_body = self
            .render_optional(REGISTRATION_TEXT_TEMPLATE, &ctx)
            .unwrap_or_else(|| {
                format!(
                    "Registration Confirmed!\n\n\
                     Hi {},\n\n\
                     Thank you for registering for our workshop!\n\n\
                     Workshop: {}\n\
                     Date: {}\n\
                     Location: {}\n\n\
                     Add to Google Calendar: {}\n\n\
                     Best regards,\n\
                     {} Team\n",
                    registration.user_name,
                    workshop.workshop_name,
                    workshop.workshop_date,
                    workshop.workshop_location,
                    calendar_url,
                    self.organization_name,
                )
            });

        let event =
            CalendarEvent::for_registration(workshop, registration, &self.organization_name);

        OutgoingEmail {
            to: registration.user_email.clone(),
            subject: format!("Registration Confirmed: {}", workshop.workshop_name),
            text_body,
            html_body,
            attachments: vec![EmailAttachment {
                filename: CALENDAR_INVITE_FILENAME.to_string(),
                content_type: CALENDAR_CONTENT_TYPE.to_string(),
                content: event.to_ics(&self.organization_name, Utc::now()),
            }],
        }
    }

    /// Announcement of `workshop` addressed to one previous attendee
    pub fn compose_announcement_email(
        &self,
        workshop: &Workshop,
        attendee: &Attendee,
    ) -> OutgoingEmail {
        let ctx = AnnouncementEmailContext {
            organization_name: &self.organization_name,
            name: &attendee.user_name,
            workshop: WorkshopContext::new(workshop),
        };

        let html_body = self.render_optional(ANNOUNCEMENT_HTML_TEMPLATE, &ctx);
        let text_body = self
            .render_optional(ANNOUNCEMENT_TEXT_TEMPLATE, &ctx)
            .unwrap_or_else(|| {
                format!(
                    "New Workshop Announcement!\n\n\
                     Hi {},\n\n\
                     We are excited to announce a new workshop: {} on {} at {}.\n\n\
                     Join us for another great learning experience!\n\n\
                     Best regards,\n\
                     {} Team\n",
                    attendee.user_name,
                    workshop.workshop_name,
                    workshop.workshop_date,
                    workshop.workshop_location,
                    self.organization_name,
                )
            });

        OutgoingEmail {
            to: attendee.user_email.clone(),
            subject: format!("New Workshop: {}", workshop.workshop_name),
            text_body,
            html_body,
            attachments: Vec::new(),
        }
    }

    /// Send the confirmation for a stored registration
    pub async fn send_registration_confirmation(
        &self,
        workshop: &Workshop,
        registration: &WorkshopRegistration,
    ) -> bool {
        let email = self.compose_registration_email(workshop, registration);

        match self.mailer.send(email).await {
            Ok(()) => {
                tracing::info!(
                    "Registration confirmation sent: registration_id={}, workshop_id={}",
                    registration.id,
                    workshop.id
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    "Failed to send registration confirmation for registration {}: {}",
                    registration.id,
                    e
                );
                false
            }
        }
    }

    /// Email every attendee about `workshop`. Each send is independent.
    pub async fn announce_workshop(
        &self,
        workshop: &Workshop,
        attendees: Vec<Attendee>,
    ) -> AnnouncementSummary {
        let recipients = attendees.len();

        let sent = stream::iter(attendees)
            .map(|attendee| {
                let email = self.compose_announcement_email(workshop, &attendee);
                async move {
                    match self.mailer.send(email).await {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::error!(
                                "Failed to send announcement to {}: {}",
                                attendee.user_email,
                                e
                            );
                            false
                        }
                    }
                }
            })
            .buffer_unordered(ANNOUNCEMENT_CONCURRENCY)
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .await;

        tracing::info!(
            "Workshop {} announced: {}/{} emails sent",
            workshop.id,
            sent,
            recipients
        );

        AnnouncementSummary { recipients, sent }
    }

    fn render_optional<C: Serialize>(&self, template: &str, ctx: C) -> Option<String> {
        match self.templates.render(template, ctx) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Email template {} unavailable: {}", template, e);
                None
            }
        }
    }
}

#[async_trait]
impl RegistrationNotifier for NotificationService {
    async fn registration_confirmed(
        &self,
        workshop: &Workshop,
        registration: &WorkshopRegistration,
    ) -> bool {
        self.send_registration_confirmation(workshop, registration)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        registration_fixture, workshop_fixture, FailingMailer, RecordingMailer,
    };

    fn service(mailer: Arc<dyn Mailer>, templates: TemplateRenderer) -> NotificationService {
        NotificationService::new(mailer, Arc::new(templates), "Django Campus")
    }

    #[tokio::test]
    async fn test_confirmation_uses_templates_and_attaches_invite() {
        let mailer = Arc::new(RecordingMailer::new());
        let svc = service(mailer.clone(), TemplateRenderer::from_dir("templates"));
        let workshop = workshop_fixture(1, "Intro to Django");
        let registration = registration_fixture(10, 1, "Jane Doe", "jane@example.com");

        assert!(svc.send_registration_confirmation(&workshop, &registration).await);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.to, "jane@example.com");
        assert_eq!(email.subject, "Registration Confirmed: Intro to Django");
        assert!(email.html_body.as_deref().is_some_and(|h| h.contains("Jane Doe")));
        assert!(email.text_body.contains("Intro to Django"));
        assert!(email.text_body.contains("https://calendar.google.com/calendar/render?"));

        let invite = &email.attachments[0];
        assert_eq!(invite.filename, "workshop_invite.ics");
        assert!(invite.content_type.starts_with("text/calendar"));
        assert!(invite.content.contains("SUMMARY:Intro to Django\r\n"));
    }

    #[tokio::test]
    async fn test_missing_templates_fall_back_to_inline_text() {
        let mailer = Arc::new(RecordingMailer::new());
        let svc = service(mailer.clone(), TemplateRenderer::empty());
        let workshop = workshop_fixture(1, "Intro to Django");
        let registration = registration_fixture(10, 1, "Jane Doe", "jane@example.com");

        let email = svc.compose_registration_email(&workshop, &registration);

        assert!(email.html_body.is_none());
        assert!(email.text_body.starts_with("Registration Confirmed!"));
        assert!(email.text_body.contains("Hi Jane Doe,"));
        assert!(email.text_body.contains("Workshop: Intro to Django"));
        assert!(email.text_body.contains("Date: 2025-03-15"));
        assert!(email.text_body.contains("Location: Main Hall"));
        assert!(email.text_body.contains("Add to Google Calendar: https://"));
        assert_eq!(email.attachments.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        let svc = service(Arc::new(FailingMailer), TemplateRenderer::empty());
        let workshop = workshop_fixture(1, "Intro to Django");
        let registration = registration_fixture(10, 1, "Jane Doe", "jane@example.com");

        assert!(!svc.registration_confirmed(&workshop, &registration).await);
    }

    #[tokio::test]
    async fn test_announcement_counts_successful_sends() {
        let mailer = Arc::new(RecordingMailer::rejecting(&["bounce@example.com"]));
        let svc = service(mailer.clone(), TemplateRenderer::from_dir("templates"));
        let workshop = workshop_fixture(2, "Advanced ORM");
        let attendees = vec![
            Attendee {
                user_name: "Ada".to_string(),
                user_email: "ada@example.com".to_string(),
            },
            Attendee {
                user_name: "Bounce".to_string(),
                user_email: "bounce@example.com".to_string(),
            },
            Attendee {
                user_name: "Grace".to_string(),
                user_email: "grace@example.com".to_string(),
            },
        ];

        let summary = svc.announce_workshop(&workshop, attendees).await;

        assert_eq!(summary, AnnouncementSummary { recipients: 3, sent: 2 });
        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|e| e.subject == "New Workshop: Advanced ORM"));
        assert!(sent.iter().all(|e| e.attachments.is_empty()));
    }

    #[test]
    fn test_announcement_fallback_text() {
        let svc = service(Arc::new(RecordingMailer::new()), TemplateRenderer::empty());
        let workshop = workshop_fixture(2, "Advanced ORM");
        let attendee = Attendee {
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
        };

        let email = svc.compose_announcement_email(&workshop, &attendee);
        assert!(email
            .text_body
            .contains("We are excited to announce a new workshop: Advanced ORM on 2025-03-15 at Main Hall."));
    }
}
