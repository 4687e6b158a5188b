//! DeleteMentorHandler - Self-service removal through a signed link.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::mentoring::MentoringError;
use crate::ports::{MentorRepository, TokenSigner};

#[derive(Debug, Clone)]
pub struct DeleteMentorCommand {
    pub token: String,
    pub now: Timestamp,
}

/// Removes the mentor named by the token's issuer claim, together with the
/// mentees that chose them.
pub struct DeleteMentorHandler {
    mentors: Arc<dyn MentorRepository>,
    signer: Arc<dyn TokenSigner>,
}

impl DeleteMentorHandler {
    pub fn new(mentors: Arc<dyn MentorRepository>, signer: Arc<dyn TokenSigner>) -> Self {
        Self { mentors, signer }
    }

    /// Returns the address of the removed mentor.
    pub async fn handle(&self, cmd: DeleteMentorCommand) -> Result<String, MentoringError> {
        let claims = self.signer.verify(cmd.token.trim(), cmd.now)?;

        if !self.mentors.delete_by_email(claims.email()).await? {
            return Err(MentoringError::MentorNotFound);
        }

        tracing::info!("Mentor removed through deletion link");
        Ok(claims.email().to_string())
    }
}
