//! In-memory mailer for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{MailMessage, Mailer};

/// Keeps sent messages; can be switched to fail every delivery.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
    failing: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every `send` fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError> {
        if self.failing {
            return Err(DomainError::new(ErrorCode::MailDeliveryFailed, "recording mailer set to fail"));
        }
        self.sent
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "mail log poisoned"))?
            .push(message.clone());
        Ok(())
    }
}
