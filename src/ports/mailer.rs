//! Outbound mail port.
//!
//! Callers treat delivery as fire and forget: a failed send is logged by
//! the application layer and never reported to the end user.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// A plain-text mail with an optional HTML alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            text: text.into(),
            html: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// # Errors
    ///
    /// - `MailDeliveryFailed` if the message could not be built or handed off
    async fn send(&self, message: &MailMessage) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }

    #[test]
    fn builder_sets_html_alternative() {
        let message = MailMessage::new("a@st.ovgu.de", "Hi", "text").with_html("<p>text</p>");
        assert_eq!(message.to, vec!["a@st.ovgu.de".to_string()]);
        assert_eq!(message.html.as_deref(), Some("<p>text</p>"));
    }
}
