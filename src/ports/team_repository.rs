//! Team repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TeamId};
use crate::domain::teams::Team;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn save(&self, team: &Team) -> Result<(), DomainError>;

    /// Teams with the given ids; unknown ids are skipped.
    async fn find_many(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError>;

    /// All teams ordered by name.
    async fn list_all(&self) -> Result<Vec<Team>, DomainError>;
}
