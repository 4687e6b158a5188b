//! Application handlers.
//!
//! - `votes` - Decisions and vote casting
//! - `teams` - Invitations, registration, login and team queries
//! - `mentoring` - Mentor and mentee sign-up, deletion links
//! - `export` - Tabular exports for superusers

pub mod export;
pub mod mentoring;
pub mod teams;
pub mod votes;

use crate::ports::{MailMessage, Mailer};

/// Sends a message without surfacing failures to the caller.
pub(crate) async fn send_best_effort(mailer: &dyn Mailer, message: MailMessage) {
    if let Err(e) = mailer.send(&message).await {
        tracing::warn!(
            error = %e,
            subject = %message.subject,
            "Mail delivery failed"
        );
    }
}
