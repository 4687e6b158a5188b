//! Membership repository port.
//!
//! Storage keeps `(team_id, user_id)` unique, so concurrent redemption of
//! the same invitation cannot create duplicates.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TeamId, UserId};
use crate::domain::teams::Membership;

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Inserts the membership unless the (team, user) pair already exists.
    ///
    /// Returns `true` if a row was created.
    async fn add_if_absent(&self, membership: &Membership) -> Result<bool, DomainError>;

    /// Ids of the teams `user` belongs to.
    async fn team_ids_of(&self, user: &UserId) -> Result<Vec<TeamId>, DomainError>;

    /// Memberships of `user`.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Membership>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Membership>, DomainError>;
}
