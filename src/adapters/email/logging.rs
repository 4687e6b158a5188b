//! Mailer that only logs.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{MailMessage, Mailer};

#[derive(Debug, Clone, Default)]
pub struct LoggingMailer;

impl LoggingMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        tracing::info!(
            to = ?message.to,
            subject = %message.subject,
            html = message.html.is_some(),
            "Mail delivery disabled, message body follows\n{}",
            message.text
        );
        Ok(())
    }
}
