//! Invitation repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::teams::Invitation;

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Persists an invitation with its teams.
    ///
    /// # Errors
    ///
    /// - `Conflict` (field `token`) if the token already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, invitation: &Invitation) -> Result<(), DomainError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<Invitation>, DomainError>;

    /// All invitations, newest first.
    async fn list_all(&self) -> Result<Vec<Invitation>, DomainError>;
}
