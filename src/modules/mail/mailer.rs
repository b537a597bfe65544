use async_trait::async_trait;
use thiserror::Error;

/// File attached to an outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    /// Full MIME type, e.g. `text/calendar; charset=utf-8`
    pub content_type: String,
    pub content: String,
}

/// A fully composed message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    /// Optional HTML alternative of `text_body`
    pub html_body: Option<String>,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid email address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Failed to send email: {0}")]
    Transport(String),

    #[error("Mailer misconfigured: {0}")]
    Config(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Mailer that only logs. Used when SMTP is not configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "Email not delivered (no SMTP relay configured)"
        );
        tracing::debug!("Email body:\n{}", email.text_body);
        Ok(())
    }
}
