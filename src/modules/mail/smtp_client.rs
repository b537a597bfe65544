//! SMTP delivery via lettre

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::mailer::{MailError, Mailer, OutgoingEmail};
use crate::core::config::{MailConfig, SmtpSecurity};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| MailError::Config("SMTP_HOST is not set".to_string()))?;

        let from = config
            .from_email
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidAddress(config.from_email.clone()))?;

        let builder = match config.smtp_security {
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Config(e.to_string()))?,
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| MailError::Config(e.to_string()))?,
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };

        let mut builder = builder.port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        tracing::info!(
            "SMTP mailer configured for {}:{} ({:?})",
            host,
            config.smtp_port,
            config.smtp_security
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Assemble the MIME message: text (and HTML) alternatives plus attachments
    pub fn build_message(&self, email: OutgoingEmail) -> Result<Message, MailError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        let body = match email.html_body {
            Some(html) => MultiPart::alternative_plain_html(email.text_body, html),
            None => MultiPart::alternative().singlepart(SinglePart::plain(email.text_body)),
        };

        let mut content = MultiPart::mixed().multipart(body);
        for attachment in email.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(e.to_string()))?;
            content = content.singlepart(
                Attachment::new(attachment.filename).body(attachment.content, content_type),
            );
        }

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .multipart(content)
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let recipient = email.to.clone();
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!("Email delivered to {}", recipient);
        Ok(())
    }
}
