//! Outbound email
//!
//! Services depend on the [`Mailer`] trait. [`SmtpMailer`] delivers through an
//! SMTP relay; [`LogMailer`] is used when no relay is configured and only
//! writes a summary of each message to the log.

mod mailer;
mod smtp_client;

pub use mailer::{EmailAttachment, LogMailer, MailError, Mailer, OutgoingEmail};
pub use smtp_client::SmtpMailer;

use std::sync::Arc;

use crate::core::config::MailConfig;

/// Pick the mailer for the given configuration
pub fn mailer_from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.smtp_host {
        Some(_) => Ok(Arc::new(SmtpMailer::new(config)?)),
        None => {
            tracing::warn!("SMTP_HOST not set, outgoing emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}
