//! SMTP mailer backed by lettre's async Tokio transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{MailMessage, Mailer};

/// Sends every message as one mail to all recipients.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, DomainError> {
        let from: Mailbox = config
            .from_header()
            .parse()
            .map_err(|e| mail_error(format!("invalid from address: {}", e)))?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| mail_error(format!("smtp relay {}: {}", config.smtp_host, e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };
        builder = builder.port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build(&self, message: &MailMessage) -> Result<Message, DomainError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(message.subject.clone());
        for to in &message.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|e| mail_error(format!("invalid recipient {}: {}", to, e)))?;
            builder = builder.to(mailbox);
        }

        let built = match &message.html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                html.clone(),
            )),
            None => builder.body(message.text.clone()),
        };
        built.map_err(|e| mail_error(format!("building message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        let mail = self.build(message)?;
        self.transport
            .send(mail)
            .await
            .map_err(|e| mail_error(format!("smtp delivery: {}", e)))?;
        tracing::info!(subject = %message.subject, recipients = message.to.len(), "Mail sent");
        Ok(())
    }
}

fn mail_error(message: String) -> DomainError {
    DomainError::new(ErrorCode::MailDeliveryFailed, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mailer() -> SmtpMailer {
        let config = EmailConfig {
            starttls: false,
            ..Default::default()
        };
        SmtpMailer::new(&config).unwrap()
    }

    #[test]
    fn builds_plain_message() {
        let message = MailMessage::new("a@st.ovgu.de", "Hello", "Body");
        assert!(mailer().build(&message).is_ok());
    }

    #[test]
    fn builds_html_alternative() {
        let message = MailMessage::new("a@st.ovgu.de", "Hello", "Body").with_html("<p>Body</p>");
        let built = mailer().build(&message).unwrap();
        let raw = String::from_utf8(built.formatted()).unwrap();
        assert!(raw.contains("multipart/alternative"));
    }

    #[test]
    fn rejects_invalid_recipient() {
        let message = MailMessage::new("not an address", "Hello", "Body");
        let err = mailer().build(&message).unwrap_err();
        assert_eq!(err.code, ErrorCode::MailDeliveryFailed);
    }
}
